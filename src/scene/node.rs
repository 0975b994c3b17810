use std::sync::Arc;
use glam::Vec3;
use crate::{HashMap, Mesh, RenderState, Transform};

/// Value stored in each node of a [`crate::SceneGraph`].
#[derive(Clone, Default, Debug)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub tags: HashMap<String, String>,
    pub hidden: bool,
}

impl SceneNode {

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn geom(&self) -> Option<&GeomNode> {
        match &self.kind {
            NodeKind::Geom(geom) => Some(geom),
            _ => None,
        }
    }

    pub fn collision(&self) -> Option<&Arc<CollisionNode>> {
        match &self.kind {
            NodeKind::Collision(collision) => Some(collision),
            _ => None,
        }
    }
}

#[derive(Clone, Default, Debug)]
pub enum NodeKind {
    /// Only groups and positions its children.
    #[default]
    Empty,
    Geom(GeomNode),
    /// Collision nodes are shared between every placement of the same tile.
    Collision(Arc<CollisionNode>),
}

/// Renderable geometry, each piece with its own render state.
#[derive(Clone, Default, Debug)]
pub struct GeomNode {
    pub entries: Vec<GeomEntry>,
}

impl GeomNode {

    pub fn add_geom(&mut self, mesh: Mesh, state: RenderState) {
        self.entries.push(GeomEntry { mesh, state });
    }

    pub fn num_vertices(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.mesh.num_vertices())
            .sum()
    }
}

#[derive(Clone, Debug)]
pub struct GeomEntry {
    pub mesh: Mesh,
    pub state: RenderState,
}

/// Set of solids that make up the collision shape of something.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct CollisionNode {
    pub name: String,
    pub solids: Vec<CollisionSolid>,
}

impl CollisionNode {

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            solids: Vec::new(),
        }
    }

    pub fn add_solid(&mut self, solid: CollisionSolid) {
        self.solids.push(solid);
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CollisionSolid {
    /// Axis-aligned box between two corners.
    Box { min: Vec3, max: Vec3 },
}
