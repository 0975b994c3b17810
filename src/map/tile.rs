use std::fmt;
use bitflags::bitflags;
use super::{Image, ObjectLayer, Properties};

/// Per-tile data stored in a tileset.
#[derive(Clone, Default, Debug)]
pub struct Tile {
    /// ID of tile local to its tileset
    pub id: u32,
    pub class: String,
    pub probability: f32,
    pub properties: Properties,
    /// Image of the tile in an image collection tileset.
    pub image: Option<Image>,
    /// Collision shapes drawn in the tile collision editor.
    pub collision: Option<ObjectLayer>,
    pub animation: Vec<Frame>,
}

/// Single frame of a tile animation.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Frame {
    pub tile_id: u32,
    /// Duration in milliseconds.
    pub duration: u32,
}

bitflags! {
    /// Flags stored in the upper bits of a [`Gid`].
    #[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash)]
    pub struct TileFlip: u32 {
        const HORIZONTAL            = 0x80000000;
        const VERTICAL              = 0x40000000;
        const DIAGONAL              = 0x20000000;
        const HEXAGONAL_ROTATION    = 0x10000000;
    }
}

/// Global tile id, as stored in layer data and tile objects.
/// Unique across all tilesets of a map, with flip flags in the upper four bits.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash, Ord, PartialOrd)]
pub struct Gid(pub u32);

impl Gid {

    pub const EMPTY: Gid = Gid(0);

    /// Id with all flags cleared.
    pub fn id(self) -> u32 {
        self.0 & !TileFlip::all().bits()
    }

    pub fn flip(self) -> TileFlip {
        TileFlip::from_bits_truncate(self.0)
    }

    /// True if no tile is placed here.
    pub fn is_empty(self) -> bool {
        self.id() == 0
    }
}

impl From<u32> for Gid {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Gid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use crate::map::{Gid, TileFlip};

    #[test]
    fn flags_are_stripped() {
        let gid = Gid(0x80000000 | 0x20000000 | 5);
        assert_eq!(5, gid.id());
        assert_eq!(TileFlip::HORIZONTAL | TileFlip::DIAGONAL, gid.flip());
        assert!(!gid.is_empty());

        let rotated = Gid(0x10000000 | 7);
        assert_eq!(7, rotated.id());
        assert!(rotated.flip().contains(TileFlip::HEXAGONAL_ROTATION));
    }

    #[test]
    fn empty() {
        assert!(Gid::EMPTY.is_empty());
        assert!(Gid(0x80000000).is_empty());
    }
}
