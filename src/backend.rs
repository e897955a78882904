//! Paint call seam between replay and a concrete drawing surface.
//!
//! Replay issues every visual through [`PaintBackend`], so the same pass
//! drives the on-screen egui painter, the offscreen raster target used for
//! export, and recording doubles in tests.

use std::ops::Range;

use egui::{pos2, Color32, Pos2, Rect};

use crate::image::PlacedImage;
use crate::texture_manager::TextureManager;

/// Winding rule for filled paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    /// Interior is wherever the signed crossing count is non-zero.
    /// Self-intersecting outlines fill solid under this rule.
    NonZero,
    /// Interior is wherever the crossing count is odd.
    EvenOdd,
}

/// Walks the horizontal spans inside the closed outline `points`.
///
/// Each row in `rows` is sampled at its pixel center: signed edge crossings
/// are sorted by x and `emit(row, start_x, end_x)` fires for every maximal
/// run that `rule` counts as inside. The half-open crossing test counts each
/// vertex exactly once. Screen and raster fills both resolve through this
/// walk.
pub(crate) fn path_spans(
    points: &[Pos2],
    rule: FillRule,
    rows: Range<i64>,
    mut emit: impl FnMut(i64, f32, f32),
) {
    let mut crossings: Vec<(f32, i32)> = Vec::new();
    for y in rows {
        let sample_y = y as f32 + 0.5;
        crossings.clear();
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            let crosses_up = a.y <= sample_y && b.y > sample_y;
            let crosses_down = b.y <= sample_y && a.y > sample_y;
            if crosses_up || crosses_down {
                let t = (sample_y - a.y) / (b.y - a.y);
                let x = a.x + t * (b.x - a.x);
                crossings.push((x, if crosses_up { 1 } else { -1 }));
            }
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let inside = |winding: i32| match rule {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        };
        let mut winding = 0;
        let mut span_start = 0.0f32;
        for &(x, direction) in &crossings {
            let was_inside = inside(winding);
            winding += direction;
            if !was_inside && inside(winding) {
                span_start = x;
            } else if was_inside && !inside(winding) {
                emit(y, span_start, x);
            }
        }
    }
}

/// Primitive drawing surface targeted by replay.
///
/// Coordinates are canvas-local; implementations translate to their own
/// space. Calls arrive in paint order and later calls cover earlier ones.
pub trait PaintBackend {
    /// Flood the whole target with `color`, replacing previous content.
    fn clear(&mut self, color: Color32);

    /// Stroke connected line segments through `points`.
    fn polyline(&mut self, points: &[Pos2], color: Color32, width: f32);

    /// Fill a disc of `radius` around `center`.
    fn filled_disc(&mut self, center: Pos2, radius: f32, color: Color32);

    /// Fill the closed path outlined by `points` under `rule`.
    fn filled_path(&mut self, points: &[Pos2], rule: FillRule, color: Color32);

    /// Composite `image` into `rect`.
    fn blit_image(&mut self, image: &PlacedImage, rect: Rect);
}

/// [`PaintBackend`] over an `egui::Painter`, for the on-screen canvas.
///
/// The painter is expected to be clipped to the canvas rect already; this
/// type only translates canvas-local coordinates by the rect origin and
/// resolves images through the texture cache.
pub struct EguiBackend<'a> {
    painter: &'a egui::Painter,
    textures: &'a mut TextureManager,
    viewport: Rect,
    origin: egui::Vec2,
}

impl<'a> EguiBackend<'a> {
    pub fn new(
        painter: &'a egui::Painter,
        textures: &'a mut TextureManager,
        canvas_rect: Rect,
    ) -> Self {
        Self {
            painter,
            textures,
            viewport: canvas_rect,
            origin: canvas_rect.min.to_vec2(),
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.origin
    }
}

impl PaintBackend for EguiBackend<'_> {
    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.viewport, 0.0, color);
    }

    fn polyline(&mut self, points: &[Pos2], color: Color32, width: f32) {
        if points.len() < 2 {
            return;
        }
        let screen: Vec<Pos2> = points.iter().map(|&p| self.to_screen(p)).collect();
        self.painter
            .add(egui::Shape::line(screen, egui::Stroke::new(width, color)));
    }

    fn filled_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }

    fn filled_path(&mut self, points: &[Pos2], rule: FillRule, color: Color32) {
        if points.len() < 3 {
            return;
        }
        // epaint tessellation cannot fill with a winding rule, so the spans
        // are scanned here and painted as one mesh of row quads.
        let screen: Vec<Pos2> = points.iter().map(|&p| self.to_screen(p)).collect();
        let mesh = fill_mesh(&screen, rule, self.viewport, color);
        if !mesh.vertices.is_empty() {
            self.painter.add(egui::Shape::mesh(mesh));
        }
    }

    fn blit_image(&mut self, image: &PlacedImage, rect: Rect) {
        let texture = self.textures.texture_for(image, self.painter.ctx());
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        self.painter
            .image(texture, rect.translate(self.origin), uv, Color32::WHITE);
    }
}

/// Builds a mesh with one quad per span of the outline, scanned under `rule`
/// and clipped to `clip`. Rows outside `clip` are never scanned.
fn fill_mesh(points: &[Pos2], rule: FillRule, clip: Rect, color: Color32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    if points.len() < 3 {
        return mesh;
    }
    let top = points
        .iter()
        .map(|p| p.y)
        .fold(f32::INFINITY, f32::min)
        .floor()
        .max(clip.min.y.floor());
    let bottom = points
        .iter()
        .map(|p| p.y)
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil()
        .min(clip.max.y.ceil());
    path_spans(points, rule, top as i64..bottom as i64, |y, start, end| {
        let x0 = start.max(clip.min.x);
        let x1 = end.min(clip.max.x);
        if x1 > x0 {
            span_quad(&mut mesh, x0, x1, y as f32, color);
        }
    });
    mesh
}

fn span_quad(mesh: &mut egui::Mesh, x0: f32, x1: f32, top: f32, color: Color32) {
    let idx = mesh.vertices.len() as u32;
    mesh.colored_vertex(pos2(x0, top), color);
    mesh.colored_vertex(pos2(x1, top), color);
    mesh.colored_vertex(pos2(x0, top + 1.0), color);
    mesh.colored_vertex(pos2(x1, top + 1.0), color);
    mesh.add_triangle(idx, idx + 1, idx + 2);
    mesh.add_triangle(idx + 2, idx + 1, idx + 3);
}
