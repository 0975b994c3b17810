//! Structs defined here mirror those in [`crate::map`].
//! The main difference is that they're mostly a 1:1 mapping of the tmx / tsx spec
//! and do not store loaded dependencies.
mod map;
mod tileset;
mod layer;
mod object;
mod data;
mod properties;

pub use map::*;
pub use tileset::*;

use crate::{AssetPath, Color};
use crate::map::TmxError;

pub(crate) fn parse_bool(value: &str) -> Result<bool, TmxError> {
    match value {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        _ => Err(TmxError::invalid_value(value)),
    }
}

pub(crate) fn parse_color(value: &str) -> Result<Color, TmxError> {
    Color::from_hex(value).ok_or_else(|| TmxError::invalid_value(value))
}

/// Resolves a path referenced by the file being parsed.
pub(crate) fn resolve_source(path: Option<&AssetPath>, source: &str) -> String {
    match path {
        Some(path) => path.resolve(source),
        None => String::from(source),
    }
}
