use std::path::Path;

use egui::{Color32, Rect, Vec2};

use crate::console::{Console, ConsoleCommand};
use crate::editor::Editor;
use crate::input::{self, HistoryAction, PointerEvent};
use crate::panels;
use crate::renderer::Renderer;
use crate::state::DrawState;

/// Export size used before the canvas has been laid out.
const FALLBACK_EXPORT_SIZE: (u32, u32) = (1024, 768);

/// Application shell wiring the editor, renderer, console and panels
/// together.
///
/// Only UI preferences are persisted across runs; the document itself lives
/// and dies with the session.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PaintApp {
    #[serde(skip)]
    editor: Editor,
    // Skip serializing the renderer since it holds GPU textures
    #[serde(skip)]
    renderer: Renderer,
    #[serde(skip)]
    console: Console,
    #[serde(skip)]
    canvas_size: Vec2,
    pub show_history: bool,
    // Picker mirrors edited in the tools panel and applied explicitly.
    pub brush_pick: Color32,
    pub background_pick: Color32,
    pub pen_size_pick: f32,
}

impl Default for PaintApp {
    fn default() -> Self {
        let style = DrawState::default();
        Self {
            editor: Editor::default(),
            renderer: Renderer::new(),
            console: Console::new(),
            canvas_size: Vec2::ZERO,
            show_history: true,
            brush_pick: style.brush,
            background_pick: style.background,
            pen_size_pick: style.pen_size,
        }
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(storage) = cc.storage {
            return eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
        }
        Self::default()
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn set_canvas_size(&mut self, size: Vec2) {
        self.canvas_size = size;
    }

    /// Routes one canvas pointer event into the gesture lifecycle.
    pub fn apply_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down => self.editor.begin_stroke(),
            PointerEvent::Move { pos, sample: true } => self.editor.add_point(pos),
            PointerEvent::Move { pos, sample: false } => self.editor.set_cursor(Some(pos)),
            PointerEvent::Up => self.editor.commit_stroke(),
        }
    }

    /// Moves the history cursor and realigns the picker mirrors with the
    /// style the move folded back in.
    pub fn apply_history_action(&mut self, action: HistoryAction) {
        match action {
            HistoryAction::Undo => self.editor.undo(),
            HistoryAction::Redo => self.editor.redo(),
        }
        self.sync_pickers();
    }

    /// Copies the editor's current style into the picker mirrors. Called
    /// after every style change that does not originate in the tools panel.
    fn sync_pickers(&mut self) {
        let style = self.editor.state();
        self.brush_pick = style.brush;
        self.background_pick = style.background;
        self.pen_size_pick = style.pen_size;
    }

    pub fn paint_canvas(&mut self, painter: &egui::Painter, canvas_rect: Rect) {
        self.renderer.paint(painter, canvas_rect, &self.editor);
    }

    fn run_console_command(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Load(path) => self.editor.load_image(Path::new(&path)),
            ConsoleCommand::Save(path) => {
                let (width, height) = self.export_size();
                match self.editor.save_image(Path::new(&path), width, height) {
                    Ok(()) => self.console.push_feedback(format!("saved {path}")),
                    Err(err) => {
                        log::error!("save to {path} failed: {err}");
                        self.console.push_feedback(format!("save failed: {err}"));
                    }
                }
            }
            ConsoleCommand::Clear => self.editor.clear(),
            ConsoleCommand::SetEraser(eraser) => self.editor.set_eraser(eraser),
            ConsoleCommand::SetMode(mode) => self.editor.set_mode(mode),
            ConsoleCommand::SetPenSize(size) => {
                self.editor.set_pen_size(size);
                self.sync_pickers();
            }
            ConsoleCommand::SetFill(color) => {
                self.editor.set_brush_color(color);
                self.sync_pickers();
            }
            ConsoleCommand::SetBackground(color) => {
                self.editor.set_background(color);
                self.sync_pickers();
            }
        }
    }

    /// Canvas size in whole pixels, or a fixed fallback before layout.
    fn export_size(&self) -> (u32, u32) {
        if self.canvas_size.x >= 1.0 && self.canvas_size.y >= 1.0 {
            (
                self.canvas_size.x.round() as u32,
                self.canvas_size.y.round() as u32,
            )
        } else {
            FALLBACK_EXPORT_SIZE
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(action) = input::history_action(ctx) {
            self.apply_history_action(action);
        }

        panels::tools_panel(self, ctx);

        egui::TopBottomPanel::bottom("console_panel").show(ctx, |ui| {
            if let Some(command) = self.console.ui(ui) {
                self.run_console_command(command);
            }
        });

        panels::central_panel(self, ctx);
    }
}
