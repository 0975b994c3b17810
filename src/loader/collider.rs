use std::sync::Arc;
use glam::Vec3;
use crate::{CollisionNode, CollisionSolid, IntMap};
use crate::map::{Gid, MapTileset, Object, ObjectShape, TmxError};

/// Collision nodes of every tile that has collision shapes, keyed by gid.
#[derive(Clone, Default, Debug)]
pub struct ColliderHandler {
    colliders: IntMap<u32, Arc<CollisionNode>>,
}

impl ColliderHandler {

    /// Builds a collision node for every tile in the tileset that has a collision object group.
    pub fn load_colliders(&mut self, tileset: &MapTileset, depth: f32) -> Result<(), TmxError> {
        for tile in tileset.tileset.tiles.values() {
            let Some(collision) = &tile.collision else { continue };
            let mut collision_node = CollisionNode::new("collision_node");
            for object in &collision.objects {
                collision_node.add_solid(load_collider(object, depth)?);
            }
            self.colliders.insert(tileset.first_gid + tile.id, Arc::new(collision_node));
        }
        Ok(())
    }

    /// Collision node of a tile, ignoring its flip flags.
    pub fn get_collider(&self, gid: Gid) -> Option<&Arc<CollisionNode>> {
        self.colliders.get(&gid.id())
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

/**
 * Converts a collision object of a tile into a solid, in the tile's pixel space.
 * The box spans from -depth to depth along Y.
 */
pub fn load_collider(object: &Object, depth: f32) -> Result<CollisionSolid, TmxError> {
    if object.shape != ObjectShape::Rectangle {
        return Err(TmxError::unsupported("Non-rectangular colliders not yet supported"));
    }
    let (x, y) = (object.position.x, object.position.y);
    let (width, height) = (object.size.x, object.size.y);
    Ok(CollisionSolid::Box {
        min: Vec3::new(x, -depth, -y - height),
        max: Vec3::new(x + width, depth, -y),
    })
}
