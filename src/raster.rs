//! Software rasterizer backing offscreen export.
//!
//! This is the authoritative implementation of the paint primitives: it
//! honors winding rules exactly and blends in plain unmultiplied sRGB, so
//! tests assert on its pixels and `save` encodes straight from its buffer.

use egui::{Color32, Pos2, Rect};
use image::{Rgba, RgbaImage};

use crate::backend::{path_spans, FillRule, PaintBackend};
use crate::image::PlacedImage;

/// [`PaintBackend`] that rasterizes into an owned RGBA8 buffer.
pub struct RasterBackend {
    pixels: RgbaImage,
}

impl RasterBackend {
    /// Fresh transparent target of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Source-over blend of one pixel, clipped to the target bounds.
    fn blend_pixel(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let src_a = u32::from(color[3]);
        if src_a == 0 {
            return;
        }
        if src_a == 255 {
            self.pixels.put_pixel(x, y, Rgba(color));
            return;
        }
        let dst = self.pixels.get_pixel(x, y).0;
        let inv = 255 - src_a;
        let mut out = [0u8; 4];
        for c in 0..3 {
            out[c] = ((u32::from(color[c]) * src_a + u32::from(dst[c]) * inv) / 255) as u8;
        }
        out[3] = (src_a + u32::from(dst[3]) * inv / 255) as u8;
        self.pixels.put_pixel(x, y, Rgba(out));
    }

    /// Fills the disc whose boundary passes through pixel centers at
    /// `radius` from `center`. The bounding box is clamped to the buffer, so
    /// an oversized radius costs at most one pass over the target.
    fn disc(&mut self, center: Pos2, radius: f32, color: [u8; 4]) {
        if radius <= 0.0 {
            self.blend_pixel(center.x.floor() as i64, center.y.floor() as i64, color);
            return;
        }
        let r2 = radius * radius;
        let min_x = ((center.x - radius).floor() as i64).max(0);
        let max_x = ((center.x + radius).ceil() as i64).min(i64::from(self.width()) - 1);
        let min_y = ((center.y - radius).floor() as i64).max(0);
        let max_y = ((center.y + radius).ceil() as i64).min(i64::from(self.height()) - 1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Bresenham walk from `a` to `b`, stamping a square brush of the given
    /// width at every step.
    fn segment(&mut self, a: Pos2, b: Pos2, color: [u8; 4], width: f32) {
        let reach = ((width.max(1.0) - 1.0) / 2.0).round() as i64;
        let (mut x0, mut y0) = (a.x.round() as i64, a.y.round() as i64);
        let (x1, y1) = (b.x.round() as i64, b.y.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp(x0, y0, reach, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Square brush stamp around `(cx, cy)`, clamped to the buffer.
    fn stamp(&mut self, cx: i64, cy: i64, reach: i64, color: [u8; 4]) {
        let min_x = (cx - reach).max(0);
        let max_x = (cx + reach).min(i64::from(self.width()) - 1);
        let min_y = (cy - reach).max(0);
        let max_y = (cy + reach).min(i64::from(self.height()) - 1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Scanline fill of a closed polygon under `rule`; rows and span ends
    /// are clamped to the buffer.
    fn fill_path(&mut self, points: &[Pos2], rule: FillRule, color: [u8; 4]) {
        if points.len() < 3 {
            return;
        }
        let min_y = points
            .iter()
            .map(|p| p.y)
            .fold(f32::INFINITY, f32::min)
            .floor()
            .max(0.0) as i64;
        let max_y = points
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil()
            .min(self.height() as f32) as i64;
        let width = i64::from(self.width());

        path_spans(points, rule, min_y..max_y, |y, start, end| {
            let first = (((start - 0.5).ceil()) as i64).max(0);
            let last = (((end - 0.5).ceil()) as i64).min(width);
            for px in first..last {
                self.blend_pixel(px, y, color);
            }
        });
    }
}

fn to_rgba8(color: Color32) -> [u8; 4] {
    color.to_srgba_unmultiplied()
}

impl PaintBackend for RasterBackend {
    fn clear(&mut self, color: Color32) {
        let rgba = Rgba(to_rgba8(color));
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba;
        }
    }

    fn polyline(&mut self, points: &[Pos2], color: Color32, width: f32) {
        let rgba = to_rgba8(color);
        match points {
            [] => {}
            [single] => self.blend_pixel(single.x.round() as i64, single.y.round() as i64, rgba),
            _ => {
                for pair in points.windows(2) {
                    self.segment(pair[0], pair[1], rgba, width);
                }
            }
        }
    }

    fn filled_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.disc(center, radius, to_rgba8(color));
    }

    fn filled_path(&mut self, points: &[Pos2], rule: FillRule, color: Color32) {
        self.fill_path(points, rule, to_rgba8(color));
    }

    fn blit_image(&mut self, source: &PlacedImage, rect: Rect) {
        if source.width() == 0 || source.height() == 0 || rect.width() <= 0.0 || rect.height() <= 0.0
        {
            return;
        }
        let min_x = (rect.min.x.floor() as i64).max(0);
        let max_x = (rect.max.x.ceil() as i64).min(i64::from(self.width()));
        let min_y = (rect.min.y.floor() as i64).max(0);
        let max_y = (rect.max.y.ceil() as i64).min(i64::from(self.height()));
        let pixels = source.rgba();
        for y in min_y..max_y {
            for x in min_x..max_x {
                // nearest-neighbor sample from the source
                let u = ((x as f32 + 0.5 - rect.min.x) / rect.width() * source.width() as f32)
                    .floor() as i64;
                let v = ((y as f32 + 0.5 - rect.min.y) / rect.height() * source.height() as f32)
                    .floor() as i64;
                let u = u.clamp(0, source.width() as i64 - 1) as usize;
                let v = v.clamp(0, source.height() as i64 - 1) as usize;
                let idx = (v * source.width() + u) * 4;
                let src = [pixels[idx], pixels[idx + 1], pixels[idx + 2], pixels[idx + 3]];
                self.blend_pixel(x, y, src);
            }
        }
    }
}
