use egui::Color32;
use serde::{Deserialize, Serialize};

/// How a committed gesture is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeMode {
    /// One filled disc per sample, radius = pen size.
    Freehand,
    /// The samples joined into a single filled path.
    Path,
}

/// Style snapshot copied into every stroke and state-change entry, so each
/// log entry is self-describing and replay never consults live state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawState {
    pub background: Color32,
    pub brush: Color32,
    pub pen_size: f32,
    pub eraser: bool,
    pub mode: ShapeMode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            background: Color32::BLACK,
            brush: Color32::WHITE,
            pen_size: 10.0,
            eraser: false,
            mode: ShapeMode::Freehand,
        }
    }
}

impl DrawState {
    /// The color strokes are filled with: the brush color, or the background
    /// color in eraser mode. Erasing is "paint with background", frozen at
    /// the time the entry was recorded.
    pub fn fill_color(&self) -> Color32 {
        if self.eraser {
            self.background
        } else {
            self.brush
        }
    }

    /// Copy of this state with both paint colors at half opacity, used for
    /// the in-flight gesture preview.
    pub fn translucent(&self) -> Self {
        Self {
            background: self.background.gamma_multiply(0.5),
            brush: self.brush.gamma_multiply(0.5),
            ..*self
        }
    }
}
