use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions, Vec2};

use crate::error::ImageLoadError;

/// The raster image measurements are drawn on. Its pixel grid is the coordinate space of all lines.
#[derive(Clone)]
pub struct BackgroundImage {
    name: String,
    size: [usize; 2],
    texture: TextureHandle,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("name", &self.name)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl BackgroundImage {
    /// Decodes any format the `image` crate understands into RGBA pixels.
    pub fn decode(bytes: &[u8]) -> Result<ColorImage, ImageLoadError> {
        if bytes.is_empty() {
            return Err(ImageLoadError::Empty);
        }
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        log::debug!("Decoded image: {}x{}", size[0], size[1]);
        Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
    }

    /// Decodes `bytes` and uploads them as a texture.
    pub fn load(ctx: &Context, name: &str, bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let image = Self::decode(bytes)?;
        let size = image.size;
        let texture = ctx.load_texture(name, image, TextureOptions::NEAREST);
        Ok(Self {
            name: name.to_owned(),
            size,
            texture,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in pixels.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size[0] as f32, self.size[1] as f32)
    }

    pub fn texture_id(&self) -> TextureId {
        self.texture.id()
    }
}
