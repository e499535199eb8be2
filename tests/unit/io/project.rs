//! Tests for LDtk project parsing and level tile collection

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use wfcldtk::AlgorithmError;
    use wfcldtk::io::project::{LdtkProject, level_tiles, load_level_tiles};

    const PROJECT: &str = r#"{
        "jsonVersion": "1.5.3",
        "levels": [
            {
                "identifier": "Level_0",
                "uid": 0,
                "layerInstances": [
                    {
                        "__identifier": "Ground",
                        "__type": "Tiles",
                        "__gridSize": 4,
                        "__tilesetRelPath": "tiles.png",
                        "gridTiles": [
                            { "px": [0, 0], "src": [0, 0], "f": 0, "t": 0 },
                            { "px": [4, 0], "src": [4, 0], "f": 0, "t": 1 },
                            { "px": [8, 0], "src": [0, 0], "f": 0, "t": 0 },
                            { "px": [12, 0], "src": [8, 0], "f": 0, "t": 2 }
                        ],
                        "autoLayerTiles": []
                    },
                    {
                        "__identifier": "Walls",
                        "__type": "AutoLayer",
                        "__gridSize": 4,
                        "__tilesetRelPath": "tiles.png",
                        "gridTiles": [],
                        "autoLayerTiles": [
                            { "px": [0, 4], "src": [4, 0], "f": 0, "t": 1 },
                            { "px": [4, 4], "src": [12, 0], "f": 0, "t": 3 }
                        ]
                    },
                    {
                        "__identifier": "Entities",
                        "__type": "Entities",
                        "__gridSize": 16,
                        "__tilesetRelPath": null
                    }
                ]
            },
            { "identifier": "Level_1", "uid": 1, "layerInstances": null }
        ]
    }"#;

    // Four 4px cells: red, green, transparent, blue
    fn write_project(dir: &Path) -> PathBuf {
        let tileset = RgbaImage::from_fn(16, 4, |x, _| match x / 4 {
            0 => Rgba([255, 0, 0, 255]),
            1 => Rgba([0, 255, 0, 255]),
            2 => Rgba([0, 0, 0, 0]),
            _ => Rgba([0, 0, 255, 255]),
        });
        tileset
            .save(dir.join("tiles.png"))
            .expect("Failed to write tileset");

        let path = dir.join("world.ldtk");
        fs::write(&path, PROJECT).expect("Failed to write project");
        path
    }

    // Tests parsing ignores fields that are not modeled
    // Verified by denying unknown fields
    #[test]
    fn test_parse_project() {
        let project = LdtkProject::from_json(PROJECT).expect("valid project");
        assert_eq!(project.levels.len(), 2);

        let level = project.level("Level_0").expect("level exists");
        let layers = level.layer_instances.as_deref().unwrap_or_default();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers.first().map(|layer| layer.tiles().count()), Some(4));
        assert_eq!(
            layers.get(1).map(|layer| layer.layer_type.as_str()),
            Some("AutoLayer")
        );
        assert!(layers.get(2).is_some_and(|layer| layer.tileset_rel_path.is_none()));
    }

    // Tests unknown levels report what exists
    // Verified by returning the first level for unknown identifiers
    #[test]
    fn test_unknown_level() {
        let project = LdtkProject::from_json(PROJECT).expect("valid project");
        let error = project.level("Boss").err();
        assert!(matches!(
            error,
            Some(AlgorithmError::UnknownLevel { ref available, .. }) if available.len() == 2
        ));
    }

    // Tests every placement yields a tile, transparent ones dropped
    // Verified by skipping source rectangles already seen
    #[test]
    fn test_level_tiles_per_placement() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_project(temp_dir.path());

        let tiles = load_level_tiles(&path, "Level_0").expect("tiles load");
        let colors: Vec<[u8; 4]> = tiles.iter().map(|tile| tile.get_pixel(0, 0).0).collect();
        assert_eq!(
            colors,
            vec![
                [255, 0, 0, 255],
                [0, 255, 0, 255],
                [255, 0, 0, 255],
                [0, 255, 0, 255],
                [0, 0, 255, 255],
            ]
        );
        assert!(tiles.iter().all(|tile| tile.dimensions() == (4, 4)));
    }

    // Tests levels saved in separate files are rejected
    // Verified by treating missing layers as an empty level
    #[test]
    fn test_external_level_rejected() {
        let project = LdtkProject::from_json(PROJECT).expect("valid project");
        let level = project.level("Level_1").expect("level exists");
        assert!(matches!(
            level_tiles(level, Path::new(".")),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    // Tests read and parse failures map to their own variants
    // Verified by mapping parse errors to file system errors
    #[test]
    fn test_project_file_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let missing = LdtkProject::from_file(&temp_dir.path().join("missing.ldtk"));
        assert!(matches!(missing, Err(AlgorithmError::FileSystem { .. })));

        let broken = temp_dir.path().join("broken.ldtk");
        fs::write(&broken, "{ not json").expect("Failed to write project");
        assert!(matches!(
            LdtkProject::from_file(&broken),
            Err(AlgorithmError::ProjectParse { .. })
        ));
    }

    // Tests a missing tileset image is reported
    // Verified by skipping layers whose tileset fails to load
    #[test]
    fn test_missing_tileset() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("world.ldtk");
        fs::write(&path, PROJECT).expect("Failed to write project");

        assert!(matches!(
            load_level_tiles(&path, "Level_0"),
            Err(AlgorithmError::ImageLoad { .. })
        ));
    }
}
