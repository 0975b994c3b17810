use std::fmt;
use derive_more::*;
use crate::{Color, HashMap};

/// Custom properties attached to maps, tilesets, tiles, layers and objects.
#[derive(Clone, PartialEq, Default, Debug, Deref, DerefMut)]
pub struct Properties(pub HashMap<String, PropertyValue>);

impl Properties {
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.0.insert(name.into(), value);
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Color(Color),
    /// Path to a file, resolved relative to the file that declared it.
    File(String),
    /// Id of an object in the same map. Zero when unset.
    Object(u32),
    /// Custom class, with its members as nested properties.
    Class {
        property_type: String,
        properties: Properties,
    },
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Color(value) => write!(f, "{value}"),
            Self::File(value) => write!(f, "{value}"),
            Self::Object(value) => write!(f, "{value}"),
            Self::Class { property_type, .. } => write!(f, "{property_type}"),
        }
    }
}
