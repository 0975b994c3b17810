//! CPU-side graphics primitives that scene nodes carry.
//! Nothing here talks to a GPU. A renderer uploads [`Mesh`]es and [`Texture`]s as it sees fit.

mod state;
mod color;
mod mesh;
mod shape;
mod texture;

pub use state::*;
pub use color::*;
pub use mesh::*;
pub use shape::*;
pub use texture::*;
