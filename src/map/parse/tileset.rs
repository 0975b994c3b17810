use roxmltree::{Document, Node};
use crate::AssetPath;
use crate::HashMap;
use crate::map::{FillMode, Frame, Grid, Image, ObjectAlignment, ObjectLayer, Orientation, Properties, Tile, TileOffset, TileRenderSize, TmxError};
use super::{parse_color, resolve_source};


/// A mostly 1:1 mapping of the TSX <tileset> specification, with its image left unloaded.
#[derive(Clone, Default, Debug)]
pub struct Tileset {
    pub name: String,
    pub class: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub spacing: u32,
    pub margin: u32,
    pub tile_count: u32,
    pub columns: u32,
    pub object_alignment: ObjectAlignment,
    pub tile_render_size: TileRenderSize,
    pub fill_mode: FillMode,
    pub tile_offset: Option<TileOffset>,
    pub grid: Option<Grid>,
    pub image: Option<Image>,
    pub properties: Properties,
    /// Tiles that store extra data, keyed by local id.
    pub tiles: HashMap<u32, Tile>,
}

impl Tileset {

    pub fn parse_doc(doc: Document, path: Option<&AssetPath>) -> Result<Self, TmxError> {
        let mut tileset = Tileset::default();
        let root = doc.root();
        for node in root.children() {
            match node.tag_name().name() {
                "tileset" => tileset.parse(node, path)?,
                _ => {}
            }
        }
        Ok(tileset)
    }

    pub fn parse(&mut self, tileset_node: Node, path: Option<&AssetPath>) -> Result<(), TmxError> {

        // Parses attributes
        for attribute in tileset_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "name" => self.name = String::from(value),
                "class" => self.class = String::from(value),
                "tilewidth" => self.tile_width = value.parse()?,
                "tileheight" => self.tile_height = value.parse()?,
                "spacing" => self.spacing = value.parse()?,
                "margin" => self.margin = value.parse()?,
                "tilecount" => self.tile_count = value.parse()?,
                "columns" => self.columns = value.parse()?,
                "objectalignment" => self.object_alignment = ObjectAlignment::parse(value)?,
                "tilerendersize" => self.tile_render_size = TileRenderSize::parse(value)?,
                "fillmode" => self.fill_mode = FillMode::parse(value)?,
                _ => {}
            }
        }

        // Parses children
        for child in tileset_node.children() {
            let tag = child.tag_name().name();
            match tag {
                "image" => self.image = Some(Image::parse(child, path)?),
                "tileoffset" => self.tile_offset = Some(TileOffset::parse(child)?),
                "grid" => self.grid = Some(Grid::parse(child)?),
                "properties" => self.properties = Properties::parse(child, path)?,
                "tile" => {
                    let tile = Tile::parse(child, path)?;
                    self.tiles.insert(tile.id, tile);
                },
                _ => {}
            }
        }
        Ok(())
    }
}

impl Image {
    pub fn parse(image_node: Node, path: Option<&AssetPath>) -> Result<Image, TmxError> {
        let mut image = Image::default();
        for attribute in image_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "format" => image.format = String::from(value),
                "source" => image.source = resolve_source(path, value),
                "trans" => image.trans = Some(parse_color(value)?),
                "width" => image.width = Some(value.parse()?),
                "height" => image.height = Some(value.parse()?),
                _ => {}
            }
        }
        Ok(image)
    }
}

impl Tile {
    fn parse(tile_node: Node, path: Option<&AssetPath>) -> Result<Tile, TmxError> {
        let mut tile = Tile { probability: 1.0, ..Default::default() };
        for attribute in tile_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "id" => tile.id = value.parse()?,
                "type" | "class" => tile.class = String::from(value),
                "probability" => tile.probability = value.parse()?,
                _ => {}
            }
        }
        for child in tile_node.children() {
            match child.tag_name().name() {
                "properties" => tile.properties = Properties::parse(child, path)?,
                "image" => tile.image = Some(Image::parse(child, path)?),
                "objectgroup" => tile.collision = Some(ObjectLayer::parse(child, path)?),
                "animation" => tile.animation = parse_animation(child)?,
                _ => {}
            }
        }
        Ok(tile)
    }
}

fn parse_animation(animation_node: Node) -> Result<Vec<Frame>, TmxError> {
    animation_node
        .children()
        .filter(|child| child.has_tag_name("frame"))
        .map(|frame_node| -> Result<Frame, TmxError> {
            let mut frame = Frame::default();
            for attribute in frame_node.attributes() {
                match attribute.name() {
                    "tileid" => frame.tile_id = attribute.value().parse()?,
                    "duration" => frame.duration = attribute.value().parse()?,
                    _ => {}
                }
            }
            Ok(frame)
        })
        .collect()
}

impl TileOffset {
    fn parse(offset_node: Node) -> Result<Self, TmxError> {
        let mut offset = TileOffset::default();
        for attribute in offset_node.attributes() {
            match attribute.name() {
                "x" => offset.x = attribute.value().parse()?,
                "y" => offset.y = attribute.value().parse()?,
                _ => {}
            }
        }
        Ok(offset)
    }
}

impl Grid {
    fn parse(grid_node: Node) -> Result<Self, TmxError> {
        let mut grid = Grid::default();
        for attribute in grid_node.attributes() {
            let value = attribute.value();
            match attribute.name() {
                "orientation" => grid.orientation = Orientation::parse(value)?,
                "width" => grid.width = value.parse()?,
                "height" => grid.height = value.parse()?,
                _ => {}
            }
        }
        Ok(grid)
    }
}
