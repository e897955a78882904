use std::fmt;
use std::path::Path;
use std::sync::Arc;

use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

/// Unique identifier for a placed image. Doubles as the texture cache key,
/// so identity must survive cloning the containing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(Uuid);

impl ImageId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Immutable decoded image placed on the canvas.
///
/// Pixels are RGBA8, row-major, unmultiplied alpha. The destination rect is
/// in canvas coordinates and is fixed when the image is placed.
#[derive(Clone)]
pub struct PlacedImage {
    id: ImageId,
    rgba: Vec<u8>,
    size: [usize; 2],
    rect: Rect,
}

/// Reference-counted handle; log entries share the pixel data.
pub type ImageRef = Arc<PlacedImage>;

impl PlacedImage {
    pub fn new(rgba: Vec<u8>, size: [usize; 2], rect: Rect) -> Self {
        Self {
            id: ImageId::new(),
            rgba,
            size,
            rect,
        }
    }

    pub fn new_ref(rgba: Vec<u8>, size: [usize; 2], rect: Rect) -> ImageRef {
        Arc::new(Self::new(rgba, size, rect))
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size[0]
    }

    pub fn height(&self) -> usize {
        self.size[1]
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl fmt::Debug for PlacedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacedImage")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("rect", &self.rect)
            .finish()
    }
}

/// Decodes the file at `path` into a [`PlacedImage`] anchored at the canvas
/// origin at its native size.
///
/// Returns `None` on any I/O or decode failure; the failure is logged and
/// otherwise swallowed, so a bad path leaves the document untouched.
pub fn load_rgba(path: &Path) -> Option<PlacedImage> {
    match image::open(path) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            let (width, height) = rgba.dimensions();
            let rect = Rect::from_min_size(
                Pos2::ZERO,
                Vec2::new(width as f32, height as f32),
            );
            Some(PlacedImage::new(
                rgba.into_raw(),
                [width as usize, height as usize],
                rect,
            ))
        }
        Err(err) => {
            log::warn!("failed to load image {}: {}", path.display(), err);
            None
        }
    }
}
