//! Turns a [`TiledMap`](crate::map::TiledMap) into a [`SceneGraph`].
//! The map lies in the XZ plane with +Z up. A Tiled point (x, y) ends up at (x, 0, -y).

mod geom;
mod arranger;
mod collider;
mod map_loader;

pub use geom::*;
pub use arranger::*;
pub use collider::*;
pub use map_loader::*;

use tracing::instrument;
use crate::{AssetManager, FileProtocol, LoaderConfig, SceneGraph};
use crate::map::{Orientation, TmxError, TmxLoader};

/// Loads a map from the filesystem with the default config.
pub fn load_map(path: impl AsRef<str>) -> Result<SceneGraph, TmxError> {
    let manager = AssetManager::builder()
        .default_protocol(FileProtocol)
        .build();
    load_map_with(&manager, path, &LoaderConfig::default())
}

/// Loads a map and everything it references through the manager given.
/// Only finite orthogonal maps are supported.
#[instrument(skip_all)]
pub fn load_map_with(manager: &AssetManager, path: impl AsRef<str>, config: &LoaderConfig) -> Result<SceneGraph, TmxError> {
    let map = manager.load(&TmxLoader, path)?;
    if map.infinite {
        return Err(TmxError::unsupported("Cannot load an infinite map"));
    }
    if map.orientation != Orientation::Orthogonal {
        return Err(TmxError::unsupported(format!("Unsupported map orientation: '{}'", map.orientation.name())));
    }
    let mut map_loader = MapLoader::new(&map, manager, config);
    map_loader.load_tile_colliders()?;
    map_loader.load_map()
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use glam::{Quat, Vec3};
    use crate::map::TmxError;
    use crate::testing::{rgb_png, rgba_png};
    use crate::{AssetManager, LoaderConfig, MemoryProtocol, NodeKind, SceneGraph, Transparency};
    use super::load_map_with;

    const LEVEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" renderorder="right-down" width="2" height="2" tilewidth="16" tileheight="16" infinite="0">
 <properties>
  <property name="music" value="theme"/>
 </properties>
 <tileset firstgid="1" name="terrain" tilewidth="16" tileheight="16" tilecount="4" columns="2">
  <image source="terrain.png" width="32" height="32"/>
  <tile id="1">
   <objectgroup draworder="index">
    <object id="1" x="0" y="0" width="16" height="16"/>
   </objectgroup>
  </tile>
 </tileset>
 <tileset firstgid="5" source="../tilesets/props.tsx"/>
 <layer id="1" name="ground" width="2" height="2" offsetx="8" offsety="4">
  <data encoding="csv">1,2,2147483650,5</data>
 </layer>
 <objectgroup id="2" name="objects">
  <object id="1" name="chest" type="Chest" gid="2" x="32" y="48" width="32" height="32" rotation="90">
   <properties>
    <property name="loot" type="int" value="3"/>
   </properties>
  </object>
  <object id="2" name="spawn" x="4" y="4" visible="0">
   <point/>
  </object>
 </objectgroup>
 <imagelayer id="3" name="sky" opacity="0.5">
  <image source="backgrounds/sky.png" width="8" height="4"/>
 </imagelayer>
 <group id="4" name="decor" visible="0">
  <layer id="5" name="details" width="2" height="2">
   <data encoding="csv">0,0,0,0</data>
  </layer>
 </group>
</map>"#;

    const PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset name="props" tilewidth="16" tileheight="16" tilecount="1" columns="1">
 <image source="props.png"/>
</tileset>"#;

    fn protocol(level: &str) -> MemoryProtocol {
        MemoryProtocol::new()
            .with_file("maps/level.tmx", level)
            .with_file("maps/terrain.png", rgb_png(32, 32))
            .with_file("tilesets/props.tsx", PROPS)
            .with_file("tilesets/props.png", rgba_png(16, 16))
            .with_file("maps/backgrounds/sky.png", rgb_png(8, 4))
    }

    fn load(level: &str, config: &LoaderConfig) -> Result<SceneGraph, TmxError> {
        let manager = AssetManager::builder().default_protocol(protocol(level)).build();
        load_map_with(&manager, "maps/level.tmx", config)
    }

    fn load_level() -> SceneGraph {
        load(LEVEL, &LoaderConfig::default()).unwrap()
    }

    fn assert_vec_close(expected: Vec3, actual: Vec3) {
        assert!(expected.abs_diff_eq(actual, 1e-4), "expected {expected}, got {actual}");
    }

    #[test]
    fn root_and_layers() {
        let graph = load_level();
        let root_id = graph.find_path("level").unwrap();
        let root = graph.get(root_id).unwrap();
        assert_eq!(Some("theme"), root.tag("music"));
        let layer_names: Vec<_> = graph.children(root_id).map(|(_, node)| node.name.as_str()).collect();
        assert_eq!(vec!["ground", "objects", "sky", "decor"], layer_names);
    }

    #[test]
    fn tile_layer() {
        let graph = load_level();
        let ground = graph.get(graph.find_path("level/ground").unwrap()).unwrap();
        assert_eq!(Vec3::new(8.0, 0.0, -4.0), ground.transform.translation);

        // One geom per tileset, in tileset order
        let tile = graph.get(graph.find_path("level/ground/tile").unwrap()).unwrap();
        let geom = tile.geom().unwrap();
        assert_eq!(2, geom.entries.len());
        assert_eq!(12, geom.entries[0].mesh.num_vertices());
        assert_eq!(4, geom.entries[1].mesh.num_vertices());
        assert_eq!(Transparency::None, geom.entries[0].state.transparency);
        assert_eq!(Transparency::Alpha, geom.entries[1].state.transparency);

        // Tile at column 1, row 1 comes from the second tileset
        let (min, max) = geom.entries[1].mesh.bounds().unwrap();
        assert_eq!((16.0, -32.0), (min.x, min.z));
        assert_eq!((32.0, -16.0), (max.x, max.z));
    }

    #[test]
    fn tile_colliders() {
        let graph = load_level();
        let cluster_id = graph.find_path("level/ground/tile/cluster_collider").unwrap();
        let locations: Vec<_> = graph.children(cluster_id).collect();
        assert_eq!(2, locations.len());
        assert!(locations.iter().all(|(_, node)| node.name == "collider_location"));
        assert_eq!(Vec3::new(16.0, 0.0, 0.0), locations[0].1.transform.translation);
        assert_eq!(Vec3::new(0.0, 0.0, -16.0), locations[1].1.transform.translation);

        // Flipped and unflipped tiles share the same collision node
        let colliders: Vec<_> = locations
            .iter()
            .map(|(location_id, _)| {
                let (_, collider) = graph.children(*location_id).next().unwrap();
                collider.collision().unwrap().clone()
            })
            .collect();
        assert!(Arc::ptr_eq(&colliders[0], &colliders[1]));
        assert_eq!(1, colliders[0].solids.len());
    }

    #[test]
    fn tile_object() {
        let graph = load_level();
        let chest_id = graph.find_path("level/objects/chest").unwrap();
        let chest = graph.get(chest_id).unwrap();
        assert_eq!(Vec3::new(32.0, 0.0, -48.0), chest.transform.translation);
        assert_eq!(Quat::from_rotation_y(90f32.to_radians()), chest.transform.rotation);
        assert_eq!(Some("Chest"), chest.tag("class"));
        assert_eq!(Some("3"), chest.tag("loot"));

        let tile = graph.get(graph.find_path("level/objects/chest/tile").unwrap()).unwrap();
        assert_eq!(Vec3::new(0.0, 0.0, 32.0), tile.transform.translation);
        assert_eq!(Vec3::new(2.0, 1.0, 2.0), tile.transform.scale);
        assert_eq!(4, tile.geom().unwrap().num_vertices());

        let collider_id = graph.find_path("level/objects/chest/tile/collision_node").unwrap();
        assert!(matches!(graph.get(collider_id).unwrap().kind, NodeKind::Collision(_)));

        // Bottom-left corner sits on the object's position, and the clockwise turn swings the top edge to the right
        let tile_world = graph.world_transform(graph.find_path("level/objects/chest/tile").unwrap()).unwrap();
        assert_vec_close(Vec3::new(32.0, 0.0, -48.0), tile_world.transform_point3(Vec3::new(0.0, 0.0, -16.0)));
        assert_vec_close(Vec3::new(64.0, 0.0, -48.0), tile_world.transform_point3(Vec3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn hidden_and_points() {
        let graph = load_level();
        let spawn = graph.get(graph.find_path("level/objects/spawn").unwrap()).unwrap();
        assert!(spawn.hidden);
        assert_eq!(0, graph.children(graph.find_path("level/objects/spawn").unwrap()).count());

        let decor = graph.get(graph.find_path("level/decor").unwrap()).unwrap();
        assert!(decor.hidden);
        let details_tile = graph.find_path("level/decor/details/tile").unwrap();
        assert_eq!(0, graph.get(details_tile).unwrap().geom().unwrap().entries.len());
    }

    #[test]
    fn image_layer() {
        let graph = load_level();
        let card = graph.get(graph.find_path("level/sky/sky").unwrap()).unwrap();
        let entry = &card.geom().unwrap().entries[0];
        let (min, max) = entry.mesh.bounds().unwrap();
        assert_eq!(Vec3::new(0.0, 0.0, -4.0), min);
        assert_eq!(Vec3::new(8.0, 0.0, 0.0), max);
        assert_eq!(Transparency::Alpha, entry.state.transparency);
        assert!(entry.state.texture.image.pixels().all(|pixel| pixel.0[3] == 128));
    }

    #[test]
    fn collider_location_with_wide_tiles() {
        let level = LEVEL
            .replace(
                r#"tilewidth="16" tileheight="16" infinite"#,
                r#"tilewidth="3000000000" tileheight="16" infinite"#,
            )
            .replace(
                r#"width="2" height="2" offsetx="8" offsety="4">
  <data encoding="csv">1,2,2147483650,5</data>"#,
                r#"width="3" height="1" offsetx="8" offsety="4">
  <data encoding="csv">0,0,2</data>"#,
            );
        let graph = load(&level, &LoaderConfig::default()).unwrap();
        let cluster_id = graph.find_path("level/ground/tile/cluster_collider").unwrap();
        let (_, location) = graph.children(cluster_id).next().unwrap();
        assert_eq!(Vec3::new(2.0 * 3_000_000_000f32, 0.0, 0.0), location.transform.translation);
    }

    #[test]
    fn image_layer_color_key() {
        let level = LEVEL.replace(
            r#"<imagelayer id="3" name="sky" opacity="0.5">
  <image source="backgrounds/sky.png" width="8" height="4"/>"#,
            r#"<imagelayer id="3" name="sky" opacity="0.5">
  <image source="backgrounds/sky.png" trans="ff00ff" width="8" height="4"/>"#,
        );
        let manager = AssetManager::builder()
            .default_protocol(protocol(&level).with_file("maps/backgrounds/sky.png", rgba_png(2, 2)))
            .build();
        let graph = load_map_with(&manager, "maps/level.tmx", &LoaderConfig::default()).unwrap();
        let card = graph.get(graph.find_path("level/sky/sky").unwrap()).unwrap();
        let texture = &card.geom().unwrap().entries[0].state.texture;
        let alphas: Vec<u8> = texture.image.pixels().map(|pixel| pixel.0[3]).collect();
        assert_eq!(vec![0, 0, 0, 0], alphas);
    }

    #[test]
    fn config_controls_hidden_and_tags() {
        let config = LoaderConfig {
            skip_hidden_layers: true,
            properties_as_tags: false,
            ..Default::default()
        };
        let graph = load(LEVEL, &config).unwrap();
        assert!(graph.find("decor").is_none());
        assert!(graph.find("spawn").is_none());
        let chest = graph.get(graph.find("chest").unwrap()).unwrap();
        assert_eq!(None, chest.tag("loot"));
        assert_eq!(Some("Chest"), chest.tag("class"));
    }

    #[test]
    fn rejects_unsupported_maps() {
        let infinite = LEVEL.replace(r#"infinite="0""#, r#"infinite="1""#);
        let Err(TmxError::Unsupported { message }) = load(&infinite, &LoaderConfig::default()) else {
            panic!("Expected infinite map to be rejected");
        };
        assert_eq!("Cannot load an infinite map", message);

        let isometric = LEVEL.replace("orthogonal", "isometric");
        let Err(TmxError::Unsupported { message }) = load(&isometric, &LoaderConfig::default()) else {
            panic!("Expected isometric map to be rejected");
        };
        assert_eq!("Unsupported map orientation: 'isometric'", message);
    }

    #[test]
    fn tile_without_tileset() {
        let level = LEVEL.replace("1,2,2147483650,5", "1,9,0,0");
        let result = load(&level, &LoaderConfig::default());
        assert!(matches!(result, Err(TmxError::MissingTileset { gid: 9 })));
    }

    #[test]
    fn non_rectangular_collider() {
        let level = LEVEL.replace(
            r#"<object id="1" x="0" y="0" width="16" height="16"/>"#,
            r#"<object id="1" x="0" y="0" width="16" height="16"><ellipse/></object>"#,
        );
        let Err(TmxError::Unsupported { message }) = load(&level, &LoaderConfig::default()) else {
            panic!("Expected ellipse collider to be rejected");
        };
        assert_eq!("Non-rectangular colliders not yet supported", message);
    }
}
