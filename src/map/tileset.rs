use std::sync::Arc;
use derive_more::*;
use glam::UVec2;
use roxmltree::Document;
use tracing::instrument;
use crate::map::parse;
use crate::{AssetLoader, AssetManager, AssetPath, Color, Texture, TextureLoader};
use super::{Orientation, Tile, TmxError};

/// Loader for a .tsx file.
/// Outputs a [`Tileset`] with its image loaded.
pub struct TsxLoader;
impl AssetLoader for TsxLoader {
    type AssetType = Tileset;
    type Error = TmxError;

    fn load(&self, bytes: &[u8], path: &AssetPath, manager: &AssetManager) -> Result<Tileset, TmxError> {
        let xml_source = std::str::from_utf8(bytes)?;
        let xml_doc = Document::parse(xml_source)?;
        let parsed_tileset = parse::Tileset::parse_doc(xml_doc, Some(path))?;
        Tileset::from_parsed(parsed_tileset, manager)
    }

    fn extensions(&self) -> &[&str] {
        &["tsx"]
    }
}

/// A processed version of [`parse::Tileset`] such that its image is decoded.
#[derive(Clone, Debug, Deref)]
pub struct Tileset {
    #[deref]
    pub data: parse::Tileset,
    pub texture: Option<Arc<Texture>>,
}

impl Tileset {

    #[instrument(skip_all)]
    pub fn from_parsed(parsed_tileset: parse::Tileset, manager: &AssetManager) -> Result<Self, TmxError> {
        let texture = match &parsed_tileset.image {
            Some(image) => {
                let mut texture = manager.load(&TextureLoader, &image.source)?;
                if let Some(trans) = image.trans {
                    texture.apply_color_key(trans);
                }
                Some(Arc::new(texture))
            },
            None => None,
        };
        Ok(Self { data: parsed_tileset, texture })
    }

    /// Size of the tileset image in pixels.
    /// Uses the size written in the file, falling back to the size of the decoded image.
    pub fn image_size(&self) -> Option<UVec2> {
        let image = self.image.as_ref()?;
        let texture = self.texture.as_ref();
        let width = image.width.or(texture.map(|texture| texture.width()))?;
        let height = image.height.or(texture.map(|texture| texture.height()))?;
        Some(UVec2::new(width, height))
    }

    /// Number of tile columns in the image.
    /// Computed from the image size for files that leave it out.
    pub fn columns(&self) -> u32 {
        if self.data.columns != 0 {
            return self.data.columns;
        }
        let Some(size) = self.image_size() else { return 0 };
        let stride = self.tile_width + self.spacing;
        if stride == 0 {
            return 0;
        }
        (size.x + self.spacing).saturating_sub(2 * self.margin) / stride
    }

    /// True if the local tile id given belongs to this tileset.
    pub fn contains(&self, tile_id: u32) -> bool {
        tile_id < self.tile_count
    }
}

#[derive(Clone, PartialEq, Default, Debug)]
pub struct Image {
    pub format: String,
    /// Path resolved relative to the file that references the image.
    pub source: String,
    /// Color treated as transparent.
    pub trans: Option<Color>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum ObjectAlignment {
    #[default]
    Unspecified,
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum FillMode {
    #[default]
    Stretch,
    PreserveAspectFit,
}

impl FillMode {
    pub fn parse(str: &str) -> Result<Self, TmxError> {
        match str {
            "stretch" => Ok(Self::Stretch),
            "preserve-aspect-fit" => Ok(Self::PreserveAspectFit),
            _ => Err(TmxError::invalid_value(str))
        }
    }
}

impl ObjectAlignment {
    pub fn parse(str: &str) -> Result<Self, TmxError> {
        match str {
            "unspecified" => Ok(Self::Unspecified),
            "topleft" => Ok(Self::TopLeft),
            "top" => Ok(Self::Top),
            "topright" => Ok(Self::TopRight),
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "bottomleft" => Ok(Self::BottomLeft),
            "bottom" => Ok(Self::Bottom),
            "bottomright" => Ok(Self::BottomRight),
            _ => Err(TmxError::invalid_value(str))
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum TileRenderSize {
    #[default]
    Tile,
    Grid,
}

impl TileRenderSize {
    pub fn parse(str: &str) -> Result<Self, TmxError> {
        match str {
            "tile" => Ok(Self::Tile),
            "grid" => Ok(Self::Grid),
            _ => Err(TmxError::invalid_value(str))
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct TileOffset { pub x: i32, pub y: i32 }

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Grid {
    pub orientation: Orientation,
    pub width: u32,
    pub height: u32,
}

impl Tileset {
    /// Tile data of a local tile id, if the tileset stores any.
    pub fn tile(&self, tile_id: u32) -> Option<&Tile> {
        self.tiles.get(&tile_id)
    }
}
