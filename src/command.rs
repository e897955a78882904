use crate::image::ImageRef;
use crate::state::DrawState;
use crate::stroke::Stroke;

/// One record in the append-only command log.
///
/// Entries are never mutated after being appended; the canvas at any point
/// in history is reproduced by replaying a prefix of the log. Undo therefore
/// needs no inverse operation per entry.
#[derive(Debug, Clone)]
pub enum Command {
    /// A committed gesture, carrying its own style snapshot.
    AddStroke(Stroke),
    /// A decoded image composited at its destination rect.
    AddImage(ImageRef),
    /// A style change. Draws nothing; replay folds these to recover the
    /// style at any cursor position.
    SetState(DrawState),
    /// Canvas-clear marker. Draws nothing itself; replay starts painting at
    /// the last visible one.
    Clear,
}

impl Command {
    /// Short name for the history panel.
    pub fn label(&self) -> &'static str {
        match self {
            Command::AddStroke(_) => "Stroke",
            Command::AddImage(_) => "Image",
            Command::SetState(_) => "State",
            Command::Clear => "Clear",
        }
    }
}
