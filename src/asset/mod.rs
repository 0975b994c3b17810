mod manager;
mod loader;
mod protocol;
mod path;

pub use manager::*;
pub use loader::*;
pub use protocol::*;
pub use path::*;
