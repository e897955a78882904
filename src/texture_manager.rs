use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::image::{ImageId, PlacedImage};

/// Caches GPU textures for placed images.
///
/// Replay touches every visible image entry each frame; without a cache each
/// frame would re-upload every image. Placed images are immutable, so the
/// image id alone is the cache key and entries never need invalidation, only
/// LRU pruning.
pub struct TextureManager {
    texture_cache: HashMap<ImageId, TextureHandle>,
    /// Frame each texture was last requested, for LRU pruning.
    last_used: HashMap<ImageId, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Advances the LRU clock. Call once at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Returns the texture for `image`, uploading it on first use.
    pub fn texture_for(&mut self, image: &PlacedImage, ctx: &Context) -> TextureId {
        let key = image.id();

        if let Some(handle) = self.texture_cache.get(&key) {
            self.last_used.insert(key, self.current_frame);
            return handle.id();
        }

        self.prune_cache_if_needed();

        let pixels = ColorImage::from_rgba_unmultiplied(image.size(), image.rgba());
        let name = format!("image_{}", image.id());
        let handle = ctx.load_texture(name, pixels, TextureOptions::LINEAR);

        let id = handle.id();
        self.texture_cache.insert(key, handle);
        self.last_used.insert(key, self.current_frame);
        id
    }

    /// Drops least-recently-used textures until the cache fits.
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(ImageId, u64)> =
            self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() + 1 - self.max_cache_size;
        for (key, _) in entries.iter().take(to_remove) {
            self.texture_cache.remove(key);
            self.last_used.remove(key);
        }
    }

    pub fn clear_cache(&mut self) {
        self.texture_cache.clear();
        self.last_used.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn contains(&self, id: ImageId) -> bool {
        self.texture_cache.contains_key(&id)
    }
}
