use crate::input;
use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
        let canvas_rect = response.rect;
        app.set_canvas_size(canvas_rect.size());

        let events = input::pointer_events(&response, canvas_rect);
        if events.is_empty() && !response.hovered() {
            app.editor_mut().set_cursor(None);
        }
        for event in events {
            app.apply_pointer_event(event);
        }

        app.paint_canvas(&painter, canvas_rect);

        if app.editor().pending().is_active() {
            ctx.request_repaint();
        }
    });
}
