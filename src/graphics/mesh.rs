use bytemuck::bytes_of;
use glam::{Vec3, Vec2};

/**
 * A 3D mesh made of indexed triangles.
*/
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Mesh {
    pub indices:    Vec<u32>,
    pub positions:  Vec<Vec3>,
    pub normals:    Option<Vec<Vec3>>,
    pub uvs:        Option<Vec<Vec2>>,
}
impl Mesh {

    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
            positions: Vec::new(),
            normals: None,
            uvs: None,
        }
    }

    /// Empty mesh with a uv buffer.
    pub fn textured() -> Self {
        Self {
            uvs: Some(Vec::new()),
            ..Self::new()
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Size in bytes of a single vertex packed by [`Mesh::pack_vertices`].
    pub fn vertex_stride(&self) -> usize {
        let mut stride = std::mem::size_of::<Vec3>();
        if self.normals.is_some() {
            stride += std::mem::size_of::<Vec3>();
        }
        if self.uvs.is_some() {
            stride += std::mem::size_of::<Vec2>();
        }
        stride
    }

    /**
     * Interleaves vertex data into a single packed byte array.
     * Layout per vertex is position, then normal and uv when present.
     */
    pub fn pack_vertices(&self, vertex_data: &mut Vec<u8>) {
        debug_assert!(self.is_consistent(), "Vertex buffers had different lengths");
        vertex_data.reserve(self.positions.len() * self.vertex_stride());
        for i in 0..self.positions.len() {

            // Position
            let bytes = bytes_of(&self.positions[i]);
            vertex_data.extend_from_slice(bytes);

            // Normals
            if let Some(normals) = &self.normals {
                let bytes = bytes_of(&normals[i]);
                vertex_data.extend_from_slice(bytes);
            }

            // UVs
            if let Some(uvs) = &self.uvs {
                let bytes = bytes_of(&uvs[i]);
                vertex_data.extend_from_slice(bytes);
            }
        }
    }

    /// Clears all buffers.
    pub fn clear(&mut self) {
        self.indices.clear();
        self.positions.clear();
        if let Some(normals) = &mut self.normals {
            normals.clear();
        }
        if let Some(uvs) = &mut self.uvs {
            uvs.clear();
        }
    }

    /// True if all vertex buffers have the same length, and every index refers to a vertex.
    pub fn is_consistent(&self) -> bool {
        let num_vertices = self.positions.len();
        if let Some(normals) = &self.normals {
            if normals.len() != num_vertices {
                return false;
            }
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != num_vertices {
                return false;
            }
        }
        self.indices.iter().all(|idx| (*idx as usize) < num_vertices)
    }

    /// Minimum and maximum corners of all positions.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        let bounds = self.positions.iter().fold((first, first), |(min, max), pos| {
            (min.min(*pos), max.max(*pos))
        });
        Some(bounds)
    }
}

#[cfg(test)]
mod test {
    use glam::{Vec2, Vec3};
    use crate::Mesh;

    #[test]
    fn pack_interleaves_uvs() {
        let mesh = Mesh {
            positions: vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)],
            uvs: Some(vec![Vec2::new(0.25, 0.5), Vec2::new(0.75, 1.0)]),
            indices: vec![0, 1, 0],
            ..Default::default()
        };
        let mut bytes = Vec::new();
        mesh.pack_vertices(&mut bytes);
        assert_eq!(20, mesh.vertex_stride());
        assert_eq!(40, bytes.len());

        let floats: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        assert_eq!(vec![1.0, 2.0, 3.0, 0.25, 0.5, 4.0, 5.0, 6.0, 0.75, 1.0], floats);
    }

    #[test]
    fn consistency() {
        let mut mesh = Mesh::textured();
        mesh.positions.push(Vec3::ZERO);
        assert!(!mesh.is_consistent());
        mesh.uvs.as_mut().unwrap().push(Vec2::ZERO);
        mesh.indices.push(1);
        assert!(!mesh.is_consistent());
        mesh.indices[0] = 0;
        assert!(mesh.is_consistent());
        mesh.clear();
        assert_eq!(0, mesh.num_vertices());
        assert!(mesh.is_consistent());
    }
}
