use glam::Vec2;
use super::{Gid, Properties};

/// Object placed in an object layer, or drawn as a tile collision shape.
#[derive(Clone, Debug)]
pub struct Object {
    pub id: u32,
    pub name: String,
    pub class: String,
    /// Position in pixels, y down.
    /// Top-left corner for most shapes, bottom-left corner for tile objects.
    pub position: Vec2,
    pub size: Vec2,
    /// Clockwise rotation in degrees.
    pub rotation: f32,
    /// Set for tile objects.
    pub gid: Option<Gid>,
    pub visible: bool,
    pub properties: Properties,
    pub shape: ObjectShape,
}

impl Default for Object {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            class: String::new(),
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            rotation: 0.0,
            gid: None,
            visible: true,
            properties: Properties::default(),
            shape: ObjectShape::Rectangle,
        }
    }
}

impl Object {
    pub fn is_tile(&self) -> bool {
        self.gid.is_some()
    }
}

#[derive(Clone, PartialEq, Default, Debug)]
pub enum ObjectShape {
    #[default]
    Rectangle,
    Ellipse,
    Point,
    /// Points relative to the object position.
    Polygon(Vec<Vec2>),
    Polyline(Vec<Vec2>),
    Text(String),
}

impl ObjectShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Point => "point",
            Self::Polygon(_) => "polygon",
            Self::Polyline(_) => "polyline",
            Self::Text(_) => "text",
        }
    }
}
