use std::num::{ParseFloatError, ParseIntError};
use std::str::Utf8Error;
use derive_more::*;
use crate::{LoadError, SceneGraphError, TextureError};

/// Error produced while parsing a map, or while turning it into a scene.
#[derive(Error, Display, From, Debug)]
pub enum TmxError {
    #[display(fmt="{_0}")]
    XmlError(roxmltree::Error),
    #[display(fmt="{_0}")]
    Utf8Error(Utf8Error),
    #[display(fmt="{_0}")]
    ParseIntError(ParseIntError),
    #[display(fmt="{_0}")]
    ParseFloatError(ParseFloatError),
    #[display(fmt="{_0}")]
    Base64Error(base64::DecodeError),
    #[display(fmt="{_0}")]
    IoError(std::io::Error),
    #[display(fmt="{_0}")]
    LoadError(LoadError),
    #[display(fmt="{_0}")]
    TextureError(TextureError),
    #[display(fmt="{_0}")]
    SceneGraphError(SceneGraphError),
    #[display(fmt="Missing attribute '{attribute}' on <{tag_name}>")]
    #[from(ignore)]
    MissingAttribute { tag_name: String, attribute: String },
    #[display(fmt="Unexpected value {value}")]
    #[from(ignore)]
    InvalidAttributeValue { value: String },
    #[display(fmt="Invalid tile data: {message}")]
    #[from(ignore)]
    InvalidData { message: String },
    #[display(fmt="Unsupported: {message}")]
    #[from(ignore)]
    Unsupported { message: String },
    #[display(fmt="Could not find tileset for tile {gid}")]
    #[from(ignore)]
    MissingTileset { gid: u32 },
    #[display(fmt="Tileset '{name}' has no image")]
    #[from(ignore)]
    MissingImage { name: String },
}

impl TmxError {

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported { message: message.into() }
    }

    pub(crate) fn invalid_value(value: impl Into<String>) -> Self {
        Self::InvalidAttributeValue { value: value.into() }
    }

    pub(crate) fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData { message: message.into() }
    }
}
