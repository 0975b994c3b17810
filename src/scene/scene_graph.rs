use std::fmt;
use glam::Mat4;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use derive_more::*;

use crate::{NodeKind, SceneNode};

/// A hierarchical collection of [`Node`]s with parent/child relationships.
/// A loaded map is a single root node whose descendants hold its layers, geometry and colliders.
#[derive(Default)]
pub struct SceneGraph {
    root_ids: Vec<NodeId>,
    nodes: SlotMap<NodeId, Node>,
}

impl SceneGraph {

    pub fn new() -> Self {
        Self {
            root_ids: Vec::default(),
            nodes: SlotMap::default(),
        }
    }

    pub fn root_ids(&self) -> &[NodeId] {
        &self.root_ids
    }

    /**
     * Iterator over all root nodes.
     */
    pub fn root_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.root_ids
            .iter()
            .flat_map(|root_id| self.get_node(*root_id))
    }

    /**
     * Iterator over all objects in the scene in no particular order.
     */
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .values()
            .map(|node| &node.value)
    }

    /**
     * Iterator over all objects in the scene in no particular order.
     */
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.nodes
            .values_mut()
            .map(|node| &mut node.value)
    }

    /**
     * Inserts a root object and returns its id.
     */
    pub fn insert(&mut self, value: SceneNode) -> NodeId {
        let node = Node {
            value,
            parent_id: None,
            children_ids: SmallVec::new(),
        };
        let node_id = self.nodes.insert(node);
        self.root_ids.push(node_id);
        node_id
    }

    /**
     * Inserts an object as a child of another.
     */
    pub fn insert_child(&mut self, value: SceneNode, parent_id: NodeId) -> Result<NodeId, SceneGraphError> {
        if !self.nodes.contains_key(parent_id) {
            return Err(SceneGraphError::NoSuchNode);
        }
        let node_id = self.nodes.insert(Node {
            value,
            parent_id: Some(parent_id),
            children_ids: SmallVec::new(),
        });
        self.nodes[parent_id].children_ids.push(node_id);
        Ok(node_id)
    }

    /**
     * Gets an object by id.
     * Unwraps it from its node for convenience.
     */
    pub fn get(&self, node_id: NodeId) -> Option<&SceneNode> {
        self.nodes
            .get(node_id)
            .map(|node| &node.value)
    }

    /**
     * Gets an object by id, wrapped in its node.
     */
    pub fn get_node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /**
     * Gets an object by id.
     */
    pub fn get_mut(&mut self, node_id: NodeId) -> Option<&mut SceneNode> {
        self.nodes
            .get_mut(node_id)
            .map(|node| &mut node.value)
    }

    /**
     * Iterator over the direct children of a node.
     * Empty if the node does not exist.
     */
    pub fn children(&self, node_id: NodeId) -> impl Iterator<Item = (NodeId, &SceneNode)> + '_ {
        self.nodes
            .get(node_id)
            .map(|node| node.children_ids.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |child_id| (*child_id, &self.nodes[*child_id].value))
    }

    /**
     * True if object is stored.
     */
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /**
     * Removes an object recursively, detaching it from its parent.
     */
    pub fn remove(&mut self, node_id: NodeId) {
        let Some(parent_id) = self.nodes.get(node_id).map(|node| node.parent_id) else { return };
        match parent_id {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(parent_id) {
                    parent.children_ids.retain(|child_id| *child_id != node_id);
                }
            },
            None => self.root_ids.retain(|root_id| *root_id != node_id),
        }
        remove(node_id, &mut self.nodes)
    }

    /**
     * Removes all [`Node`]s.
     */
    pub fn clear(&mut self) {
        self.root_ids.clear();
        self.nodes.clear();
    }

    /**
     * The number of [`Node`]s stored.
     */
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Recursive fold-like operation starting at the root nodes.
    /// Value accumulates from parent to child.
    /// Useful for implementing transform propagation.
    pub fn propagate<'a, A, F>(&'a self, accum: A, mut function: F)
    where
        A: Clone,
        F: FnMut(A, NodeId, &'a SceneNode) -> A
    {
        for root_id in self.root_ids() {
            propagate_at(&self.nodes, *root_id, accum.clone(), &mut function);
        };
    }

    /// First node with the name given, searching depth-first from the roots.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.root_ids
            .iter()
            .find_map(|root_id| find_at(&self.nodes, *root_id, name))
    }

    /// Node reached by following names separated by '/', starting with a root's name.
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        let mut names = path.split('/');
        let root_name = names.next()?;
        let mut current = self.root_ids
            .iter()
            .copied()
            .find(|root_id| self.nodes[*root_id].value.name == root_name)?;
        for name in names {
            current = self.children(current)
                .find(|(_, child)| child.name == name)
                .map(|(child_id, _)| child_id)?;
        }
        Some(current)
    }

    /// Transform of a node relative to the root of its tree.
    pub fn world_transform(&self, node_id: NodeId) -> Option<Mat4> {
        let mut node = self.nodes.get(node_id)?;
        let mut transform = Mat4::from(node.value.transform);
        while let Some(parent_id) = node.parent_id {
            node = &self.nodes[parent_id];
            transform = Mat4::from(node.value.transform) * transform;
        }
        Some(transform)
    }
}

fn propagate_at<'a, A, F>(
    nodes: &'a SlotMap<NodeId, Node>,
    node_id: NodeId,
    accum: A,
    function: &mut F
)
where
    A: Clone,
    F: FnMut(A, NodeId, &'a SceneNode) -> A
{
    let node = &nodes[node_id];
    let current = function(accum, node_id, &node.value);
    for child_id in &node.children_ids {
        propagate_at(nodes, *child_id, current.clone(), function);
    }
}

fn find_at(nodes: &SlotMap<NodeId, Node>, node_id: NodeId, name: &str) -> Option<NodeId> {
    let node = &nodes[node_id];
    if node.value.name == name {
        return Some(node_id);
    }
    node.children_ids
        .iter()
        .find_map(|child_id| find_at(nodes, *child_id, name))
}

fn remove(node_id: NodeId, nodes: &mut SlotMap<NodeId, Node>) {
    let Some(node) = nodes.remove(node_id) else { return };
    for child_id in &node.children_ids {
        remove(*child_id, nodes);
    }
}

impl fmt::Display for SceneGraph {
    /// Indented tree of node names, with a summary of what each node carries.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(graph: &SceneGraph, node_id: NodeId, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let node = &graph.nodes[node_id];
            let value = &node.value;
            write!(f, "{:indent$}{}", "", value.name, indent = depth * 2)?;
            match &value.kind {
                NodeKind::Empty => {},
                NodeKind::Geom(geom) => write!(f, " (geoms: {}, vertices: {})", geom.entries.len(), geom.num_vertices())?,
                NodeKind::Collision(collision) => write!(f, " (solids: {})", collision.solids.len())?,
            }
            if value.hidden {
                write!(f, " [hidden]")?;
            }
            writeln!(f)?;
            for child_id in &node.children_ids {
                write_node(graph, *child_id, depth + 1, f)?;
            }
            Ok(())
        }
        for root_id in &self.root_ids {
            write_node(self, *root_id, 0, f)?;
        }
        Ok(())
    }
}

/// Container of a scene graph value, and a reference to its parent and children.
pub struct Node {
    value: SceneNode,
    parent_id: Option<NodeId>,
    children_ids: SmallVec<[NodeId; 8]>,
}

impl Node {
    pub fn value(&self) -> &SceneNode {
        &self.value
    }
    pub fn value_mut(&mut self) -> &mut SceneNode {
        &mut self.value
    }
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }
    pub fn children_ids(&self) -> &[NodeId] {
        &self.children_ids
    }
}

new_key_type! {
    /**
     * ID for a [`Node`].
     */
    pub struct NodeId;
}

#[derive(Error, Display, Debug)]
pub enum SceneGraphError {
    #[display(fmt="No such node")]
    NoSuchNode,
}

#[cfg(test)]
mod test {
    use glam::{Mat4, Vec3};
    use crate::{SceneGraph, SceneNode, Transform};

    fn graph() -> SceneGraph {
        let mut graph = SceneGraph::new();
        let root = graph.insert(SceneNode::new("map"));
        let layer = graph.insert_child(
            SceneNode::new("ground").with_transform(Transform::IDENTITY.with_xyz(10.0, 0.0, -5.0)),
            root,
        ).unwrap();
        graph.insert_child(
            SceneNode::new("tile").with_transform(Transform::IDENTITY.with_scale_xyz(2.0, 1.0, 2.0)),
            layer,
        ).unwrap();
        graph.insert_child(SceneNode::new("objects"), root).unwrap();
        graph
    }

    #[test]
    fn find_by_name_and_path() {
        let graph = graph();
        let tile = graph.find("tile").unwrap();
        assert_eq!(Some(tile), graph.find_path("map/ground/tile"));
        assert_eq!(None, graph.find_path("map/objects/tile"));
        assert_eq!(None, graph.find("missing"));
    }

    #[test]
    fn world_transform_accumulates() {
        let graph = graph();
        let tile = graph.find("tile").unwrap();
        let world = graph.world_transform(tile).unwrap();
        assert_eq!(Vec3::new(12.0, 0.0, -3.0), world.transform_point3(Vec3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn propagate_visits_every_node() {
        let graph = graph();
        let mut depths = Vec::new();
        graph.propagate(0, |depth, _, node| {
            depths.push((node.name.clone(), depth));
            depth + 1
        });
        depths.sort();
        assert_eq!(
            vec![
                (String::from("ground"), 1),
                (String::from("map"), 0),
                (String::from("objects"), 1),
                (String::from("tile"), 2),
            ],
            depths
        );
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut graph = graph();
        let ground = graph.find("ground").unwrap();
        let root = graph.root_ids()[0];
        graph.remove(ground);
        assert_eq!(2, graph.len());
        assert_eq!(1, graph.children(root).count());
        assert!(graph.find("tile").is_none());
        assert_eq!(Some(Mat4::IDENTITY), graph.world_transform(root));
    }

    #[test]
    fn insert_child_of_missing_parent() {
        let mut graph = graph();
        let ground = graph.find("ground").unwrap();
        graph.remove(ground);
        assert!(graph.insert_child(SceneNode::new("orphan"), ground).is_err());
    }

    #[test]
    fn display_tree() {
        let graph = graph();
        assert_eq!("map\n  ground\n    tile\n  objects\n", graph.to_string());
    }
}
