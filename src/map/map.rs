use std::sync::Arc;
use rayon::prelude::*;
use roxmltree::Document;
use tracing::instrument;
use crate::map::parse::{self, TilesetEntry};
use crate::{AssetLoader, AssetManager, AssetPath, Color};
use super::{Gid, Layer, Properties, Tileset, TmxError, TsxLoader};

/// Loader for a .tmx file.
/// Outputs a [`TiledMap`] with every tileset it references loaded.
pub struct TmxLoader;
impl AssetLoader for TmxLoader {

    type AssetType = TiledMap;
    type Error = TmxError;

    fn load(&self, bytes: &[u8], path: &AssetPath, manager: &AssetManager) -> Result<TiledMap, TmxError> {
        let source = std::str::from_utf8(bytes)?;
        let doc = Document::parse(source)?;
        let parsed_map = parse::TiledMap::parse_doc(doc, Some(path))?;
        TiledMap::from_parsed(parsed_map, path.clone(), manager)
    }

    fn extensions(&self) -> &[&str] {
        &["tmx"]
    }
}

/// A processed version of [`parse::TiledMap`] such that its tilesets are loaded.
#[derive(Clone, Debug)]
pub struct TiledMap {
    pub path: AssetPath,
    pub version: String,
    pub tiled_version: String,
    pub class: String,
    pub orientation: Orientation,
    pub render_order: RenderOrder,
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub infinite: bool,
    pub background_color: Option<Color>,
    pub properties: Properties,
    /// Tilesets in document order.
    pub tilesets: Vec<MapTileset>,
    pub layers: Vec<Layer>,
}

impl TiledMap {

    /// Loads the tilesets of a parsed map.
    /// External tilesets and tileset images are loaded in parallel.
    #[instrument(skip_all)]
    pub fn from_parsed(parsed_map: parse::TiledMap, path: AssetPath, manager: &AssetManager) -> Result<Self, TmxError> {
        let tilesets = parsed_map.tilesets
            .into_par_iter()
            .map(|entry| -> Result<MapTileset, TmxError> { match entry {
                TilesetEntry::Internal { first_gid, tileset } => {
                    let tileset = Tileset::from_parsed(tileset, manager)?;
                    Ok(MapTileset { first_gid, tileset: Arc::new(tileset) })
                },
                TilesetEntry::External { first_gid, source } => {
                    let tileset = manager.load(&TsxLoader, &source)?;
                    Ok(MapTileset { first_gid, tileset: Arc::new(tileset) })
                },
            }})
            .collect::<Result<Vec<_>, TmxError>>()?;
        log::debug!("Loaded {} tileset(s) for {path}", tilesets.len());
        Ok(Self {
            path,
            version: parsed_map.version,
            tiled_version: parsed_map.tiled_version,
            class: parsed_map.class,
            orientation: parsed_map.orientation,
            render_order: parsed_map.render_order,
            width: parsed_map.width,
            height: parsed_map.height,
            tile_width: parsed_map.tile_width,
            tile_height: parsed_map.tile_height,
            infinite: parsed_map.infinite,
            background_color: parsed_map.background_color,
            properties: parsed_map.properties,
            tilesets,
            layers: parsed_map.layers,
        })
    }

    /// Index of the tileset that the gid given belongs to.
    pub fn tileset_index(&self, gid: Gid) -> Option<usize> {
        let id = gid.id();
        self.tilesets
            .iter()
            .position(|tileset| tileset.contains(id))
    }
}

/// Tileset along with the first global id its tiles start at.
#[derive(Clone, Debug)]
pub struct MapTileset {
    pub first_gid: u32,
    pub tileset: Arc<Tileset>,
}

impl MapTileset {

    /// True if the flag-free gid given refers to a tile of this tileset.
    pub fn contains(&self, id: u32) -> bool {
        id >= self.first_gid && self.tileset.contains(id - self.first_gid)
    }

    /// Tile id local to this tileset.
    pub fn local_id(&self, gid: Gid) -> u32 {
        gid.id() - self.first_gid
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum Orientation {
    #[default]
    Orthogonal,
    Isometric,
    Staggered,
    Hexagonal,
}

impl Orientation {
    pub fn parse(str: &str) -> Result<Self, TmxError> {
        match str {
            "orthogonal" => Ok(Self::Orthogonal),
            "isometric" => Ok(Self::Isometric),
            "staggered" => Ok(Self::Staggered),
            "hexagonal" => Ok(Self::Hexagonal),
            _ => Err(TmxError::invalid_value(str)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Orthogonal => "orthogonal",
            Self::Isometric => "isometric",
            Self::Staggered => "staggered",
            Self::Hexagonal => "hexagonal",
        }
    }
}

/// Order in which Tiled renders tiles.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum RenderOrder {
    #[default]
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
}

impl RenderOrder {
    pub fn parse(str: &str) -> Result<Self, TmxError> {
        match str {
            "right-down" => Ok(Self::RightDown),
            "right-up" => Ok(Self::RightUp),
            "left-down" => Ok(Self::LeftDown),
            "left-up" => Ok(Self::LeftUp),
            _ => Err(TmxError::invalid_value(str)),
        }
    }
}
