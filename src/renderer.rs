//! Replay rendering: the document is a log, the canvas is a pure function
//! of its visible prefix.

use egui::{pos2, vec2, Color32, Pos2, Rect, Vec2};

use crate::backend::{EguiBackend, FillRule, PaintBackend};
use crate::command::Command;
use crate::editor::Editor;
use crate::history::CommandHistory;
use crate::raster::RasterBackend;
use crate::state::{DrawState, ShapeMode};
use crate::texture_manager::TextureManager;

/// Replays the visible log prefix into `backend`.
///
/// Two passes. The first walks the whole prefix without painting, finding
/// the last clear marker and folding style changes into the effective
/// background. The second clears to that background and paints entries from
/// the marker on. Entries are read-only throughout; replaying twice in a row
/// produces identical paint calls.
pub fn replay(history: &CommandHistory, backend: &mut dyn PaintBackend) {
    let visible = history.visible();

    let mut start = 0;
    let mut folded = DrawState::default();
    for (index, command) in visible.iter().enumerate() {
        match command {
            Command::SetState(state) => folded = *state,
            Command::Clear => start = index,
            Command::AddStroke(_) | Command::AddImage(_) => {}
        }
    }

    backend.clear(folded.background);

    for command in &visible[start..] {
        match command {
            Command::AddStroke(stroke) => paint_stroke(stroke.points(), stroke.style(), backend),
            Command::AddImage(image) => backend.blit_image(image, image.rect()),
            Command::SetState(_) | Command::Clear => {}
        }
    }
}

/// Paints one committed or pending gesture with the given style.
///
/// Freehand mode stamps a filled disc per sample; path mode fills the
/// samples as one closed non-zero-winding path, so self-crossing outlines
/// fill solid instead of punching holes.
fn paint_stroke(points: &[Pos2], style: DrawState, backend: &mut dyn PaintBackend) {
    if points.is_empty() {
        return;
    }
    let color = style.fill_color();
    match style.mode {
        ShapeMode::Freehand => {
            for &point in points {
                backend.filled_disc(point, style.pen_size, color);
            }
        }
        ShapeMode::Path => backend.filled_path(points, FillRule::NonZero, color),
    }
}

/// Paints the gesture in flight at half opacity over the replayed canvas.
pub fn paint_preview(points: &[Pos2], style: DrawState, backend: &mut dyn PaintBackend) {
    paint_stroke(points, style.translucent(), backend);
}

/// Paints the crosshair cursor and the per-mode tool hint at `pos`.
///
/// This overlay is screen feedback only; it never enters the log and never
/// appears in exports.
pub fn paint_cursor(pos: Pos2, style: DrawState, viewport: Vec2, backend: &mut dyn PaintBackend) {
    // full-viewport crosshair, black under white so it reads on any background
    let reach = viewport.x.max(viewport.y);
    paint_cross(pos, reach, Color32::BLACK, 3.0, backend);
    paint_cross(pos, reach, Color32::WHITE, 1.0, backend);

    match style.mode {
        ShapeMode::Path => {
            // small diagonal cross in the active fill color
            let arm = 10.0;
            let color = style.fill_color();
            for (a, b) in [
                (vec2(-arm, -arm), vec2(arm, arm)),
                (vec2(-arm, arm), vec2(arm, -arm)),
            ] {
                backend.polyline(&[pos + a, pos + b], Color32::WHITE, 3.0);
                backend.polyline(&[pos + a, pos + b], color, 1.0);
            }
        }
        ShapeMode::Freehand => {
            // brush footprint preview with a white rim
            backend.filled_disc(pos, style.pen_size, style.fill_color().gamma_multiply(0.5));
            backend.polyline(&circle_outline(pos, style.pen_size), Color32::WHITE, 1.0);
        }
    }
}

fn paint_cross(center: Pos2, reach: f32, color: Color32, width: f32, backend: &mut dyn PaintBackend) {
    backend.polyline(
        &[pos2(center.x - reach, center.y), pos2(center.x + reach, center.y)],
        color,
        width,
    );
    backend.polyline(
        &[pos2(center.x, center.y - reach), pos2(center.x, center.y + reach)],
        color,
        width,
    );
}

fn circle_outline(center: Pos2, radius: f32) -> Vec<Pos2> {
    let segments = 32;
    (0..=segments)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / segments as f32;
            pos2(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Replays the visible log into an offscreen RGBA buffer of the given size.
///
/// Runs the exact pass the screen sees, minus preview and cursor overlays.
pub fn render_to_image(history: &CommandHistory, width: u32, height: u32) -> image::RgbaImage {
    let mut backend = RasterBackend::new(width, height);
    replay(history, &mut backend);
    backend.into_image()
}

/// Screen-side renderer: owns the texture cache and paints the full canvas
/// stack (replayed document, pending gesture, cursor) each frame.
pub struct Renderer {
    textures: TextureManager,
}

impl Renderer {
    const TEXTURE_CACHE_SIZE: usize = 32;

    pub fn new() -> Self {
        Self {
            textures: TextureManager::new(Self::TEXTURE_CACHE_SIZE),
        }
    }

    pub fn paint(&mut self, painter: &egui::Painter, canvas_rect: Rect, editor: &Editor) {
        self.textures.begin_frame();
        let clipped = painter.with_clip_rect(canvas_rect);
        let mut backend = EguiBackend::new(&clipped, &mut self.textures, canvas_rect);

        replay(editor.history(), &mut backend);

        if editor.pending().is_active() {
            paint_preview(editor.pending().points(), editor.state(), &mut backend);
        }

        if let Some(pos) = editor.cursor_pos() {
            paint_cursor(pos, editor.state(), canvas_rect.size(), &mut backend);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
