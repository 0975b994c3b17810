use derive_more::*;
use image::{ImageError, RgbaImage};
use serde::{Deserialize, Serialize};
use crate::{AssetLoader, AssetManager, AssetPath, Color, LoadError};

/// Decodes image files into [`Texture`]s.
pub struct TextureLoader;
impl AssetLoader for TextureLoader {
    type AssetType = Texture;
    type Error = TextureError;

    fn load(&self, bytes: &[u8], path: &AssetPath, _manager: &AssetManager) -> Result<Texture, TextureError> {
        Ok(Texture::from_bytes(bytes, path.to_string())?)
    }

    fn extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg", "bmp", "gif", "tga"]
    }
}

/// Decoded image, stored as RGBA8 pixels with the top row first.
#[derive(Clone, Debug)]
pub struct Texture {
    pub path: String,
    pub image: RgbaImage,
    /// Number of color components in the source image, before expansion to RGBA.
    pub components: u8,
}

impl Texture {

    pub fn from_bytes(bytes: &[u8], path: impl Into<String>) -> Result<Self, ImageError> {
        let image = image::load_from_memory(bytes)?;
        let components = image.color().channel_count();
        Ok(Self {
            path: path.into(),
            image: image.to_rgba8(),
            components,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn has_alpha(&self) -> bool {
        self.components > 3
    }

    /// Copy of this texture where every pixel's alpha is replaced with the opacity given.
    pub fn with_opacity(&self, opacity: f32) -> Texture {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut image = self.image.clone();
        for pixel in image.pixels_mut() {
            pixel.0[3] = alpha;
        }
        Texture {
            path: self.path.clone(),
            image,
            components: 4,
        }
    }

    /// Makes every pixel matching the color key fully transparent.
    pub fn apply_color_key(&mut self, key: Color) {
        let [r, g, b, _] = key.to_rgba8();
        for pixel in self.image.pixels_mut() {
            let [pr, pg, pb, _] = pixel.0;
            if (pr, pg, pb) == (r, g, b) {
                pixel.0[3] = 0;
            }
        }
        self.components = 4;
    }
}

/// Sampling filter used when a texture is magnified.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
}

#[derive(Error, Display, From, Debug)]
pub enum TextureError {
    #[display(fmt="{_0}")]
    ImageError(ImageError),
    #[display(fmt="{_0}")]
    LoadError(LoadError),
}
