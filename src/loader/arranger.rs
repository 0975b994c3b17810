use crate::{FilterMode, Mesh, RenderState};
use crate::map::{Gid, MapTileset, TmxError};
use super::geom::{tile_flip_transform, tile_shape_transform, tile_uv_transform, TileGeomBuilder};

/// Lays out tiles of a single tileset into one mesh.
pub struct TileArranger<'a> {
    tileset: &'a MapTileset,
    builder: TileGeomBuilder,
}

impl<'a> TileArranger<'a> {

    pub fn new(tileset: &'a MapTileset) -> Self {
        Self {
            tileset,
            builder: TileGeomBuilder::default(),
        }
    }

    /// Adds the tile at column x, row y of the grid.
    /// Empty tiles are skipped.
    pub fn add_tile(&mut self, gid: Gid, x: u32, y: u32) -> Result<(), TmxError> {
        if gid.is_empty() {
            return Ok(());
        }
        let tileset = &self.tileset.tileset;
        let uv_transform = tile_uv_transform(tileset, self.tileset.local_id(gid))? * tile_flip_transform(gid.flip());
        let shape_transform = tile_shape_transform(x, y, tileset.tile_width, tileset.tile_height);
        self.builder.add_tile(shape_transform, uv_transform);
        Ok(())
    }

    pub fn num_tiles(&self) -> usize {
        self.builder.num_tiles()
    }

    /// Mesh of every tile added, along with the state to render it with.
    pub fn generate_geom(mut self, filter: FilterMode) -> Result<(Mesh, RenderState), TmxError> {
        let tileset = &self.tileset.tileset;
        let texture = tileset.texture
            .clone()
            .ok_or_else(|| TmxError::MissingImage { name: tileset.name.clone() })?;
        let mesh = self.builder.generate_geom();
        Ok((mesh, RenderState::make(texture, filter)))
    }
}
