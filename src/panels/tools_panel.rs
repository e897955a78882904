use egui::color_picker::{color_edit_button_srgba, Alpha};

use crate::input::HistoryAction;
use crate::state::ShapeMode;
use crate::PaintApp;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let mode = app.editor().state().mode;
            for (label, target) in [("Freehand", ShapeMode::Freehand), ("Path", ShapeMode::Path)] {
                if ui.selectable_label(mode == target, label).clicked() && mode != target {
                    app.editor_mut().set_mode(target);
                }
            }

            let mut eraser = app.editor().state().eraser;
            if ui.checkbox(&mut eraser, "Eraser").changed() {
                app.editor_mut().set_eraser(eraser);
            }

            ui.separator();

            // Pickers edit local mirrors; the editor only sees one state
            // entry per applied change, not one per picker tick.
            ui.horizontal(|ui| {
                ui.label("Pen size:");
                let response = ui.add(egui::Slider::new(&mut app.pen_size_pick, 1.0..=64.0));
                let released = response.drag_stopped() || response.lost_focus();
                if released && app.pen_size_pick != app.editor().state().pen_size {
                    let size = app.pen_size_pick;
                    app.editor_mut().set_pen_size(size);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Brush:");
                color_edit_button_srgba(ui, &mut app.brush_pick, Alpha::OnlyBlend);
                if ui.button("Apply").clicked() {
                    let color = app.brush_pick;
                    app.editor_mut().set_brush_color(color);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Background:");
                color_edit_button_srgba(ui, &mut app.background_pick, Alpha::OnlyBlend);
                if ui.button("Apply").clicked() {
                    let color = app.background_pick;
                    app.editor_mut().set_background(color);
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.editor().can_undo();
                let can_redo = app.editor().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.apply_history_action(HistoryAction::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.apply_history_action(HistoryAction::Redo);
                }
                if ui.button("Clear").clicked() {
                    app.editor_mut().clear();
                }
            });

            ui.separator();

            ui.checkbox(&mut app.show_history, "Show history");
            if app.show_history {
                history_view(app, ui);
            }
        });
}

fn history_view(app: &PaintApp, ui: &mut egui::Ui) {
    let history = app.editor().history();
    ui.label(format!(
        "cursor {} / {} (floor {})",
        history.cursor(),
        history.len(),
        history.floor()
    ));

    egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
        egui::Grid::new("history_grid")
            .num_columns(2)
            .spacing([24.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                for (index, command) in history.entries().iter().enumerate() {
                    if index < history.cursor() {
                        ui.label(format!("{index}"));
                        ui.label(command.label());
                    } else {
                        // undone future, still in the log until overwritten
                        ui.weak(format!("{index}"));
                        ui.weak(command.label());
                    }
                    ui.end_row();
                }
            });
    });
}
