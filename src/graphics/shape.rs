use glam::{Vec2, Vec3};
use crate::{Mesh, Rect};

const NORM_FRONT: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/**
 * A flat textured rectangle in the XZ plane, facing -Y.
 * The frame's x range maps to X and its y range maps to Z.
 */
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Card {
    pub frame: Rect,
}

impl Card {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self { frame: Rect::from_frame(left, right, bottom, top) }
    }
}

impl From<Card> for Mesh {
    fn from(card: Card) -> Self {
        let frame = card.frame;
        let (left, right) = (frame.left(), frame.right());
        let (bottom, top) = (frame.bottom(), frame.top());
        Mesh {
            positions: vec![
                Vec3::new(left, 0.0, top),
                Vec3::new(left, 0.0, bottom),
                Vec3::new(right, 0.0, bottom),
                Vec3::new(right, 0.0, top),
            ],
            normals: Some(vec![NORM_FRONT; 4]),
            uvs: Some(vec![
                Vec2::new(0.0, 1.0),
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
            ]),
            indices: vec![0, 1, 2, 2, 3, 0],
        }
    }
}

#[cfg(test)]
mod test {
    use glam::Vec3;
    use crate::{Card, Mesh};

    #[test]
    fn card_spans_frame() {
        let mesh = Mesh::from(Card::new(0.0, 64.0, -32.0, 0.0));
        assert!(mesh.is_consistent());
        assert_eq!(2, mesh.num_triangles());
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(Vec3::new(0.0, 0.0, -32.0), min);
        assert_eq!(Vec3::new(64.0, 0.0, 0.0), max);
    }
}
