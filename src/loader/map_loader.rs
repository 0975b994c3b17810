use std::sync::Arc;
use tracing::instrument;
use crate::{AssetManager, Card, CollisionNode, GeomNode, LoaderConfig, Mesh, NodeId, NodeKind, RenderState, SceneGraph, SceneNode, TextureLoader, Transform};
use crate::map::{Gid, GroupLayer, ImageLayer, Layer, LayerKind, MapTileset, Object, ObjectLayer, Properties, TileLayer, TiledMap, TmxError};
use super::{ColliderHandler, TileArranger};

/**
 * Builds the scene graph of a single map.
 * Every layer becomes a node under a root named after the map file.
 */
pub struct MapLoader<'a> {
    map: &'a TiledMap,
    manager: &'a AssetManager,
    config: &'a LoaderConfig,
    collider_handler: ColliderHandler,
    graph: SceneGraph,
}

impl<'a> MapLoader<'a> {

    pub fn new(map: &'a TiledMap, manager: &'a AssetManager, config: &'a LoaderConfig) -> Self {
        Self {
            map,
            manager,
            config,
            collider_handler: ColliderHandler::default(),
            graph: SceneGraph::new(),
        }
    }

    /// Builds the collision nodes of every tileset's tiles.
    /// Must run before [`MapLoader::load_map`] for tiles to receive colliders.
    pub fn load_tile_colliders(&mut self) -> Result<(), TmxError> {
        for tileset in &self.map.tilesets {
            self.collider_handler.load_colliders(tileset, self.config.collider_depth)?;
        }
        log::debug!("Loaded colliders of {} tile(s)", self.collider_handler.len());
        Ok(())
    }

    /// Tileset the gid belongs to, along with its index in the map.
    pub fn find_source(&self, gid: Gid) -> Result<(usize, &'a MapTileset), TmxError> {
        let map = self.map;
        let index = map
            .tileset_index(gid)
            .ok_or(TmxError::MissingTileset { gid: gid.id() })?;
        Ok((index, &map.tilesets[index]))
    }

    #[instrument(skip_all)]
    pub fn load_map(mut self) -> Result<SceneGraph, TmxError> {
        let map = self.map;
        let mut root = SceneNode::new(map.path.file_stem());
        self.tag_node(&mut root, &map.class, &map.properties);
        let root_id = self.graph.insert(root);
        for layer in &map.layers {
            self.load_layer(layer, root_id)?;
        }
        log::debug!("Built scene of {} with {} node(s)", map.path, self.graph.len());
        Ok(self.graph)
    }

    pub fn load_layer(&mut self, layer: &Layer, parent_id: NodeId) -> Result<(), TmxError> {
        if !layer.visible && self.config.skip_hidden_layers {
            log::debug!("Skipping hidden layer '{}'", layer.name);
            return Ok(());
        }
        let transform = Transform::IDENTITY.with_xyz(layer.offset.x, 0.0, -layer.offset.y);
        let mut node = SceneNode::new(&layer.name)
            .with_transform(transform)
            .with_hidden(!layer.visible);
        self.tag_node(&mut node, &layer.class, &layer.properties);
        let layer_id = self.graph.insert_child(node, parent_id)?;
        match &layer.kind {
            LayerKind::TileLayer(tile_layer) => self.load_tile_layer(layer, tile_layer, layer_id),
            LayerKind::ObjectLayer(object_layer) => self.load_object_layer(object_layer, layer_id),
            LayerKind::ImageLayer(image_layer) => self.load_image_layer(layer, image_layer, layer_id),
            LayerKind::GroupLayer(group_layer) => self.load_layer_group(group_layer, layer_id),
        }
    }

    /**
     * Adds a "tile" geom node holding every tile of the layer, one geom per tileset used.
     * Tiles with colliders get a "collider_location" node under the "cluster_collider" child of "tile".
     */
    pub fn load_tile_layer(&mut self, layer: &Layer, tile_layer: &TileLayer, layer_id: NodeId) -> Result<(), TmxError> {
        let map = self.map;
        if tile_layer.data.is_none() {
            log::warn!("Tile layer '{}' stores its tiles in chunks, which are not loaded", layer.name);
        }
        let mut arrangers: Vec<Option<TileArranger<'a>>> = map.tilesets.iter().map(|_| None).collect();
        let mut collider_locations = Vec::new();
        for (x, y, gid) in tile_layer.tiles() {
            let (index, tileset) = self.find_source(gid)?;
            arrangers[index]
                .get_or_insert_with(|| TileArranger::new(tileset))
                .add_tile(gid, x, y)?;
            if let Some(collider) = self.collider_handler.get_collider(gid) {
                collider_locations.push((x, y, collider.clone()));
            }
        }

        let mut geom = GeomNode::default();
        for arranger in arrangers.into_iter().flatten() {
            log::trace!("Arranged {} tile(s)", arranger.num_tiles());
            let (mesh, state) = arranger.generate_geom(self.config.tile_filter)?;
            geom.add_geom(mesh, state);
        }
        let tile_id = self.graph.insert_child(SceneNode::new("tile").with_kind(NodeKind::Geom(geom)), layer_id)?;
        let cluster_id = self.graph.insert_child(SceneNode::new("cluster_collider"), tile_id)?;
        for (x, y, collider) in collider_locations {
            let transform = Transform::IDENTITY.with_xyz(
                x as f32 * map.tile_width as f32,
                0.0,
                -(y as f32 * map.tile_height as f32),
            );
            let location = SceneNode::new("collider_location").with_transform(transform);
            let location_id = self.graph.insert_child(location, cluster_id)?;
            self.attach_collider(collider, location_id)?;
        }
        Ok(())
    }

    pub fn load_object_layer(&mut self, object_layer: &ObjectLayer, layer_id: NodeId) -> Result<(), TmxError> {
        for object in &object_layer.objects {
            if !object.visible && self.config.skip_hidden_layers {
                log::debug!("Skipping hidden object '{}'", object.name);
                continue;
            }
            self.place_object(object, layer_id)?;
        }
        Ok(())
    }

    /**
     * Adds a node for the object at its position, turned by its rotation.
     * Tile objects get a "tile" geom child stretched to the object's size, along with the tile's collider.
     */
    pub fn place_object(&mut self, object: &Object, parent_id: NodeId) -> Result<NodeId, TmxError> {
        let transform = Transform::IDENTITY
            .with_xyz(object.position.x, 0.0, -object.position.y)
            .with_roll_degrees(object.rotation);
        let mut node = SceneNode::new(&object.name)
            .with_transform(transform)
            .with_hidden(!object.visible);
        self.tag_node(&mut node, &object.class, &object.properties);
        let object_id = self.graph.insert_child(node, parent_id)?;
        let Some(gid) = object.gid else {
            log::trace!("Placed {} object '{}'", object.shape.name(), object.name);
            return Ok(object_id);
        };

        let (_, tileset) = self.find_source(gid)?;
        let mut arranger = TileArranger::new(tileset);
        arranger.add_tile(gid, 0, 0)?;
        let (mesh, state) = arranger.generate_geom(self.config.tile_filter)?;
        let mut geom = GeomNode::default();
        geom.add_geom(mesh, state);

        // Tile objects without a size are drawn at the tileset's tile size
        let tile_width = tileset.tileset.tile_width as f32;
        let tile_height = tileset.tileset.tile_height as f32;
        let width = if object.size.x > 0.0 { object.size.x } else { tile_width };
        let height = if object.size.y > 0.0 { object.size.y } else { tile_height };
        let tile_transform = Transform::IDENTITY
            .with_xyz(0.0, 0.0, height)
            .with_scale_xyz(width / tile_width, 1.0, height / tile_height);
        let tile = SceneNode::new("tile")
            .with_transform(tile_transform)
            .with_kind(NodeKind::Geom(geom));
        let tile_id = self.graph.insert_child(tile, object_id)?;
        if let Some(collider) = self.collider_handler.get_collider(gid).cloned() {
            self.attach_collider(collider, tile_id)?;
        }
        Ok(object_id)
    }

    /**
     * Adds a card named after the image file, spanning the image's size in pixels above and to the right of the layer origin.
     * The layer's opacity replaces the alpha of every pixel, except those matching the color key.
     */
    pub fn load_image_layer(&mut self, layer: &Layer, image_layer: &ImageLayer, layer_id: NodeId) -> Result<(), TmxError> {
        let Some(image) = &image_layer.image else {
            log::warn!("Image layer '{}' has no image", layer.name);
            return Ok(());
        };
        let mut texture = self.manager
            .load(&TextureLoader, &image.source)?
            .with_opacity(layer.opacity);
        // Keyed pixels stay transparent whatever the opacity
        if let Some(trans) = image.trans {
            texture.apply_color_key(trans);
        }
        let (width, height) = (texture.width() as f32, texture.height() as f32);
        let image_path = self.manager.parse_path(&image.source)?;

        let mesh = Mesh::from(Card::new(0.0, width, -height, 0.0));
        let state = RenderState::make(Arc::new(texture), self.config.image_filter);
        let mut geom = GeomNode::default();
        geom.add_geom(mesh, state);
        let card = SceneNode::new(image_path.file_stem()).with_kind(NodeKind::Geom(geom));
        self.graph.insert_child(card, layer_id)?;
        Ok(())
    }

    pub fn load_layer_group(&mut self, group_layer: &GroupLayer, layer_id: NodeId) -> Result<(), TmxError> {
        for sublayer in group_layer.iter() {
            self.load_layer(sublayer, layer_id)?;
        }
        Ok(())
    }

    fn attach_collider(&mut self, collider: Arc<CollisionNode>, parent_id: NodeId) -> Result<NodeId, TmxError> {
        let node = SceneNode::new(collider.name.clone()).with_kind(NodeKind::Collision(collider));
        Ok(self.graph.insert_child(node, parent_id)?)
    }

    fn tag_node(&self, node: &mut SceneNode, class: &str, properties: &Properties) {
        if !class.is_empty() {
            node.set_tag("class", class);
        }
        if self.config.properties_as_tags {
            for (name, value) in properties.iter() {
                node.set_tag(name, value.to_string());
            }
        }
    }
}
