mod scene_graph;
mod node;

pub use scene_graph::*;
pub use node::*;
