//! Sprite textures
//!
//! PNGs are decoded with the `image` crate and uploaded as nearest-filtered
//! textures. A sprite whose file is missing or broken keeps working: it
//! takes its size from the fixed extents table and draws as a flat box.

use std::path::Path;

use macroquad::prelude::*;

use crate::game::{FixedExtents, Renderer, SpriteAtlas, SpriteId};

/// Decode a PNG into a GPU texture.
pub fn load_png<P: AsRef<Path>>(path: P) -> Result<Texture2D, String> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(format!("{} is too large ({}x{})", path.display(), width, height));
    }
    let texture = Texture2D::from_rgba8(width as u16, height as u16, rgba.as_raw());
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

pub struct SpriteSheet {
    textures: [Option<Texture2D>; SpriteId::COUNT],
    fallback: FixedExtents,
}

impl SpriteSheet {
    /// Load every sprite image from `dir`. Needs a live graphics context.
    pub fn load(dir: &Path) -> Self {
        let textures: [Option<Texture2D>; SpriteId::COUNT] = std::array::from_fn(|i| {
            let file = SpriteId::ALL[i].file_name()?;
            match load_png(dir.join(file)) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    log::warn!("{}; using a placeholder", e);
                    None
                }
            }
        });
        let loaded = textures.iter().flatten().count();
        log::info!("loaded {} sprite textures from {}", loaded, dir.display());

        Self {
            textures,
            fallback: FixedExtents::default(),
        }
    }

    pub fn texture(&self, sprite: SpriteId) -> Option<&Texture2D> {
        self.textures[sprite.index()].as_ref()
    }
}

impl SpriteAtlas for SpriteSheet {
    fn sprite_extents(&self, sprite: SpriteId) -> Vec2 {
        match self.texture(sprite) {
            Some(texture) => texture.size(),
            None => self.fallback.sprite_extents(sprite),
        }
    }
}

/// Draws entities centered on their position.
pub struct SheetRenderer<'a> {
    sheet: &'a SpriteSheet,
}

impl<'a> SheetRenderer<'a> {
    pub fn new(sheet: &'a SpriteSheet) -> Self {
        Self { sheet }
    }
}

impl Renderer for SheetRenderer<'_> {
    fn draw_entity(&mut self, position: Vec2, sprite: SpriteId, tint: Color) {
        let size = self.sheet.sprite_extents(sprite);
        let corner = position - size / 2.0;
        match self.sheet.texture(sprite) {
            Some(texture) => draw_texture(texture, corner.x, corner.y, tint),
            None => draw_rectangle(corner.x, corner.y, size.x, size.y, tint),
        }
    }
}
