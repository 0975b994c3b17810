mod transform;

pub use transform::*;
