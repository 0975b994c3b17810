use roxmltree::{Document, Node};
use crate::{AssetPath, Color};
use crate::map::{Layer, Orientation, Properties, RenderOrder, TmxError};
use crate::map::parse;
use super::{parse_bool, parse_color, resolve_source};

/// A mostly 1:1 mapping of the TMX <map> specification, with dependent tilesets left unloaded.
#[derive(Clone, Default, Debug)]
pub struct TiledMap {
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
    pub tilesets: Vec<TilesetEntry>,
    pub layers: Vec<Layer>,
}

impl TiledMap {

    pub fn parse_doc(map_doc: Document, path: Option<&AssetPath>) -> Result<Self, TmxError> {
        let mut map = Self::default();
        let root = map_doc.root();
        for node in root.children() {
            let tag_name = node.tag_name().name();
            match tag_name {
                "map" => map.parse(node, path)?,
                _ => {},
            }
        }
        Ok(map)
    }

    fn parse(&mut self, map_node: Node, path: Option<&AssetPath>) -> Result<(), TmxError> {

        // Parses map attributes
        for attribute in map_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "version" => self.version = String::from(value),
                "tiledversion" => self.tiled_version = String::from(value),
                "class" => self.class = String::from(value),
                "orientation" => self.orientation = Orientation::parse(value)?,
                "renderorder" => self.render_order = RenderOrder::parse(value)?,
                "width" => self.width = value.parse()?,
                "height" => self.height = value.parse()?,
                "tilewidth" => self.tile_width = value.parse()?,
                "tileheight" => self.tile_height = value.parse()?,
                "infinite" => self.infinite = parse_bool(value)?,
                "backgroundcolor" => self.background_color = Some(parse_color(value)?),
                _ => {}
            }
        }

        // Traverses children
        for node in map_node.children() {
            let tag_name = node.tag_name().name();
            match tag_name {
                "tileset" => self.tilesets.push(TilesetEntry::parse(node, path)?),
                "properties" => self.properties = Properties::parse(node, path)?,
                _ => {
                    if let Some(layer) = Layer::parse(node, path)? {
                        self.layers.push(layer);
                    }
                },
            }
        }
        Ok(())
    }
}

/// A single tileset stored in a [`TiledMap`].
/// Either stores the tileset, or references it in another file.
#[derive(Clone, Debug)]
pub enum TilesetEntry {
    Internal {
        first_gid: u32,
        tileset: parse::Tileset,
    },
    External {
        first_gid: u32,
        source: String,
    }
}

impl TilesetEntry {

    pub fn first_gid(&self) -> u32 {
        match self {
            Self::Internal { first_gid, .. } => *first_gid,
            Self::External { first_gid, .. } => *first_gid,
        }
    }

    fn parse(entry_node: Node, path: Option<&AssetPath>) -> Result<Self, TmxError> {
        let first_gid: u32 = entry_node
            .attribute("firstgid")
            .ok_or_else(|| TmxError::MissingAttribute {
                tag_name: String::from("tileset"),
                attribute: String::from("firstgid"),
            })?
            .parse()?;
        if let Some(source) = entry_node.attribute("source") {
            let source = resolve_source(path, source);
            Ok(TilesetEntry::External { first_gid, source })
        }
        else {
            let mut tileset = parse::Tileset::default();
            tileset.parse(entry_node, path)?;
            Ok(TilesetEntry::Internal { first_gid, tileset })
        }
    }
}
