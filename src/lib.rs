mod asset;
mod graphics;
mod math;
mod scene;
mod util;
mod config;
mod loader;
pub mod map;

#[cfg(test)]
mod testing;

pub use asset::*;
pub use graphics::*;
pub use math::*;
pub use scene::*;
pub use util::*;
pub use config::*;
pub use loader::*;
