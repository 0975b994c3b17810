use std::path::Path;
use derive_more::*;
use serde::{Deserialize, Serialize};
use crate::FilterMode;

/// Options that control how a map becomes a scene graph.
/// Every field is optional when read from YAML.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Half the thickness, along Y, of the boxes built from tile collision shapes.
    pub collider_depth: f32,
    /// Magnification filter of tileset textures.
    pub tile_filter: FilterMode,
    /// Magnification filter of image layer textures.
    pub image_filter: FilterMode,
    /// Copies custom properties of layers and objects into node tags.
    pub properties_as_tags: bool,
    /// Leaves invisible layers and objects out of the scene instead of hiding them.
    pub skip_hidden_layers: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            collider_depth: 16.0,
            tile_filter: FilterMode::Nearest,
            image_filter: FilterMode::Linear,
            properties_as_tags: true,
            skip_hidden_layers: false,
        }
    }
}

impl LoaderConfig {

    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&source)?;
        log::debug!("Loaded config {config:?}");
        Ok(config)
    }
}

#[derive(Error, Display, From, Debug)]
pub enum ConfigError {
    #[display(fmt="{_0}")]
    Io(std::io::Error),
    #[display(fmt="{_0}")]
    Yaml(serde_yaml::Error),
}
