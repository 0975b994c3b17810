use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::Mesh;
use crate::map::{TileFlip, Tileset, TmxError};

/// Corners of the unit tile in the XZ plane, counter-clockwise when seen from -Y.
const TILE_POINTS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];
const TILE_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Reflection across the tile's anti-diagonal, as seen with +Z up.
const DIAGONAL_FLIP: Mat4 = Mat4::from_cols(
    Vec4::new(0.0, 0.0, -1.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(-1.0, 0.0, 0.0, 0.0),
    Vec4::new(1.0, 0.0, 1.0, 1.0),
);

/**
 * Accumulates textured quads into a single mesh.
 * Each quad is the unit tile, placed by a shape transform and textured by a uv transform.
 */
#[derive(Clone, Debug)]
pub struct TileGeomBuilder {
    mesh: Mesh,
}

impl Default for TileGeomBuilder {
    fn default() -> Self {
        Self { mesh: Mesh::textured() }
    }
}

impl TileGeomBuilder {

    pub fn add_tile(&mut self, shape_transform: Mat4, uv_transform: Mat4) {
        let start = self.mesh.positions.len() as u32;
        let uvs = self.mesh.uvs.get_or_insert_with(Vec::new);
        for point in TILE_POINTS {
            let point = Vec3::new(point.x, 0.0, point.y);
            let uv = uv_transform.transform_point3(point);
            self.mesh.positions.push(shape_transform.transform_point3(point));
            uvs.push(Vec2::new(uv.x, uv.z));
        }
        self.mesh.indices.extend(TILE_INDICES.iter().map(|index| start + index));
    }

    pub fn num_tiles(&self) -> usize {
        self.mesh.positions.len() / TILE_POINTS.len()
    }

    /// Takes the mesh built so far, leaving the builder empty.
    pub fn generate_geom(&mut self) -> Mesh {
        std::mem::replace(&mut self.mesh, Mesh::textured())
    }
}

/**
 * Transform that applies the flips of a tile to points of the unit tile.
 * The diagonal flip happens first, then the horizontal, then the vertical.
 * Meant to be applied to texture coordinates so that the winding of the quad is left untouched.
 */
pub fn tile_flip_transform(flip: TileFlip) -> Mat4 {
    let mut transform = Mat4::IDENTITY;
    if flip.contains(TileFlip::DIAGONAL) {
        transform *= DIAGONAL_FLIP;
    }
    if flip.contains(TileFlip::HORIZONTAL) {
        transform *= Mat4::from_translation(Vec3::X) * Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0));
    }
    if flip.contains(TileFlip::VERTICAL) {
        transform *= Mat4::from_translation(Vec3::Z) * Mat4::from_scale(Vec3::new(1.0, 1.0, -1.0));
    }
    transform
}

/**
 * Transform mapping the unit tile onto the texture coordinates of a tile in its tileset's image.
 * Texture coordinates have their origin at the bottom left of the image.
 */
pub fn tile_uv_transform(tileset: &Tileset, tile_id: u32) -> Result<Mat4, TmxError> {
    let Some(image_size) = tileset.image_size() else {
        if tileset.tiles.values().any(|tile| tile.image.is_some()) {
            return Err(TmxError::unsupported(format!("Image collection tileset '{}'", tileset.name)));
        }
        return Err(TmxError::MissingImage { name: tileset.name.clone() });
    };
    let columns = tileset.columns();
    if columns == 0 || image_size.x == 0 || image_size.y == 0 {
        return Err(TmxError::invalid_data(format!("Tileset '{}' has an empty image", tileset.name)));
    }
    let (tile_width, tile_height) = (tileset.tile_width as f32, tileset.tile_height as f32);
    let (spacing, margin) = (tileset.spacing as f32, tileset.margin as f32);
    let (image_width, image_height) = (image_size.x as f32, image_size.y as f32);

    let row = (tile_id / columns) as f32;
    let col = (tile_id % columns) as f32;
    let tile_scale = Mat4::from_scale(Vec3::new(tile_width, 1.0, tile_height));
    let shift = Mat4::from_translation(Vec3::new(margin, 0.0, image_height - margin - tile_height));
    let translation = Mat4::from_translation(Vec3::new(
        col * (tile_width + spacing),
        0.0,
        -row * (tile_height + spacing),
    ));
    let image_scale = Mat4::from_scale(Vec3::new(1.0 / image_width, 1.0, 1.0 / image_height));
    Ok(image_scale * translation * shift * tile_scale)
}

/// Places the unit tile at column x, row y of a grid with the tile size given.
pub fn tile_shape_transform(x: u32, y: u32, tile_width: u32, tile_height: u32) -> Mat4 {
    let scale = Mat4::from_scale(Vec3::new(tile_width as f32, 1.0, tile_height as f32));
    let translation = Mat4::from_translation(Vec3::new(x as f32, 0.0, -(y as f32) - 1.0));
    scale * translation
}
