//! Tiled map data model.
//! [`TmxLoader`] and [`TsxLoader`] read .tmx and .tsx files through the [`crate::AssetManager`].

mod error;
mod map;
mod tile;
mod tileset;
mod layer;
mod object;
mod properties;
pub mod parse;

pub use error::*;
pub use map::*;
pub use tile::*;
pub use tileset::*;
pub use layer::*;
pub use object::*;
pub use properties::*;
