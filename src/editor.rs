use std::path::Path;
use std::sync::Arc;

use egui::{Color32, Pos2};
use thiserror::Error;

use crate::command::Command;
use crate::history::CommandHistory;
use crate::image::load_rgba;
use crate::renderer;
use crate::state::{DrawState, ShapeMode};
use crate::stroke::{PendingStroke, Stroke};

/// Errors surfaced by the export path. Every other editor operation
/// swallows bad input instead of reporting it.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// A drawing session: the command log, the gesture in flight, and a cached
/// copy of the current style.
///
/// The cache exists so per-sample operations never re-fold the log; it is
/// rebuilt from the visible prefix whenever the cursor moves, which keeps it
/// equal to `history.fold_visible()` at all times.
pub struct Editor {
    history: CommandHistory,
    pending: PendingStroke,
    state: DrawState,
    cursor: Option<Pos2>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Color32::BLACK)
    }
}

impl Editor {
    /// Opens a session over the given background color.
    ///
    /// Seeds the log with the background state change and an initial clear,
    /// then pins the undo floor after them, so a fresh session starts with
    /// two entries that undo can never remove.
    pub fn new(background: Color32) -> Self {
        let mut editor = Self {
            history: CommandHistory::new(),
            pending: PendingStroke::default(),
            state: DrawState::default(),
            cursor: None,
        };
        editor.set_background(background);
        editor.clear();
        editor.history.pin_floor();
        editor
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn pending(&self) -> &PendingStroke {
        &self.pending
    }

    pub fn cursor_pos(&self) -> Option<Pos2> {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Style setters. Each one first abandons any gesture in flight, then
    // appends the full updated style as a log entry.

    pub fn set_background(&mut self, color: Color32) {
        self.pending.cancel();
        self.state.background = color;
        self.push_state();
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        self.pending.cancel();
        self.state.brush = color;
        self.push_state();
    }

    pub fn set_pen_size(&mut self, size: f32) {
        self.pending.cancel();
        self.state.pen_size = size;
        self.push_state();
    }

    pub fn set_mode(&mut self, mode: ShapeMode) {
        self.pending.cancel();
        self.state.mode = mode;
        self.push_state();
    }

    pub fn set_eraser(&mut self, eraser: bool) {
        self.pending.cancel();
        self.state.eraser = eraser;
        self.push_state();
    }

    pub fn toggle_eraser(&mut self) {
        self.set_eraser(!self.state.eraser);
    }

    fn push_state(&mut self) {
        self.history.push(Command::SetState(self.state));
    }

    /// Appends a clear marker. Earlier entries stay in the log and remain
    /// reachable by undoing past the marker.
    pub fn clear(&mut self) {
        self.pending.cancel();
        self.history.push(Command::Clear);
    }

    // Gesture lifecycle, driven by pointer input.

    pub fn begin_stroke(&mut self) {
        self.pending.begin();
    }

    pub fn add_point(&mut self, pos: Pos2) {
        self.cursor = Some(pos);
        self.pending.add_point(pos);
    }

    /// Ends the gesture in flight. A gesture with at least one sample
    /// becomes a stroke entry stamped with the current style; an empty one
    /// appends nothing.
    pub fn commit_stroke(&mut self) {
        if let Some(points) = self.pending.finish() {
            self.history.push(Command::AddStroke(Stroke::new(points, self.state)));
        }
    }

    pub fn cancel_stroke(&mut self) {
        self.pending.cancel();
    }

    /// Updates the hover position used for the cursor overlay. `None` hides
    /// the overlay.
    pub fn set_cursor(&mut self, pos: Option<Pos2>) {
        self.cursor = pos;
    }

    // History navigation. The style cache is refolded from the new visible
    // prefix after every move. A gesture in flight survives navigation; if
    // it commits afterwards, the push truncates the undone future.

    pub fn undo(&mut self) {
        self.history.undo();
        self.refold_state();
    }

    pub fn redo(&mut self) {
        self.history.redo();
        self.refold_state();
    }

    fn refold_state(&mut self) {
        self.state = self.history.fold_visible();
    }

    /// Loads the image at `path` and appends it to the log at its native
    /// size, anchored at the canvas origin.
    ///
    /// A path that cannot be read or decoded is logged and ignored; the
    /// document does not change.
    pub fn load_image(&mut self, path: &Path) {
        if let Some(loaded) = load_rgba(path) {
            self.history.push(Command::AddImage(Arc::new(loaded)));
        }
    }

    /// Renders the visible document into an offscreen pixel buffer.
    pub fn render_to_image(&self, width: u32, height: u32) -> image::RgbaImage {
        renderer::render_to_image(&self.history, width, height)
    }

    /// Renders the visible document offscreen and encodes it to `path`.
    /// The format follows the file extension.
    pub fn save_image(&self, path: &Path, width: u32, height: u32) -> Result<(), ExportError> {
        let rendered = self.render_to_image(width, height);
        rendered.save(path)?;
        Ok(())
    }
}
