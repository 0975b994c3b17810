use derive_more::*;
use glam::Vec2;
use crate::Color;
use super::{Gid, Image, Object, Properties};

#[derive(Clone, Debug)]
pub struct Layer {
    pub id: u32,
    pub name: String,
    pub class: String,
    pub opacity: f32,
    pub visible: bool,
    /// Offset in pixels, y down.
    pub offset: Vec2,
    pub parallax: Vec2,
    pub tint_color: Option<Color>,
    pub properties: Properties,
    pub kind: LayerKind,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            id: 0,
            name: String::new(),
            class: String::new(),
            opacity: 1.0,
            visible: true,
            offset: Vec2::ZERO,
            parallax: Vec2::ONE,
            tint_color: None,
            properties: Properties::default(),
            kind,
        }
    }
}

#[derive(Clone, Debug)]
pub enum LayerKind {
    TileLayer(TileLayer),
    ObjectLayer(ObjectLayer),
    ImageLayer(ImageLayer),
    GroupLayer(GroupLayer),
}

#[derive(Clone, Default, Debug)]
pub struct TileLayer {
    pub width: u32,
    pub height: u32,
    /// Row-major global tile ids.
    /// None for layers whose tiles are stored in chunks, as infinite maps do.
    pub data: Option<Vec<Gid>>,
}

impl TileLayer {

    pub fn get_tile_gid(&self, x: u32, y: u32) -> Option<Gid> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.data.as_ref()?.get(idx).copied()
    }

    /// Iterator over non-empty tiles, as (x, y, gid), in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (u32, u32, Gid)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, gid)| !gid.is_empty())
            .map(move |(idx, gid)| {
                let idx = idx as u32;
                (idx % width, idx / width, *gid)
            })
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum DrawOrder {
    #[default]
    TopDown,
    Index,
}

/// Group of objects. Used both as a layer and for tile collision shapes.
#[derive(Clone, Default, Debug)]
pub struct ObjectLayer {
    pub color: Option<Color>,
    pub draw_order: DrawOrder,
    pub objects: Vec<Object>,
}

#[derive(Clone, Default, Debug)]
pub struct ImageLayer {
    pub image: Option<Image>,
    pub repeat_x: bool,
    pub repeat_y: bool,
}

#[derive(Clone, Default, Debug, Deref)]
pub struct GroupLayer(pub Vec<Layer>);
impl GroupLayer {
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.0.iter()
    }
}

#[cfg(test)]
mod test {
    use crate::map::{Gid, TileLayer};

    #[test]
    fn tiles_skip_empty() {
        let layer = TileLayer {
            width: 3,
            height: 2,
            data: Some(vec![Gid(1), Gid(0), Gid(2), Gid(0), Gid(0), Gid(0x80000003)]),
        };
        let tiles: Vec<_> = layer.tiles().collect();
        assert_eq!(vec![(0, 0, Gid(1)), (2, 0, Gid(2)), (2, 1, Gid(0x80000003))], tiles);
        assert_eq!(Some(Gid(2)), layer.get_tile_gid(2, 0));
        assert_eq!(None, layer.get_tile_gid(3, 0));
    }

    #[test]
    fn chunked_layer_has_no_tiles() {
        let layer = TileLayer { width: 4, height: 4, data: None };
        assert_eq!(0, layer.tiles().count());
        assert_eq!(None, layer.get_tile_gid(0, 0));
    }
}
