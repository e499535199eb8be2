//! LDtk project loading
//!
//! Only the parts of the LDtk JSON format needed to collect the tiles a
//! level uses are modeled. Every tile-bearing layer of the requested level
//! contributes the tiles it places, cropped out of the layer's tileset.

use image::RgbaImage;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::analysis::signature::is_transparent;
use crate::io::error::{AlgorithmError, Result, invalid_source};
use crate::io::sheet::{crop, load_sheet};

/// Root of an LDtk project file
#[derive(Debug, Clone, Deserialize)]
pub struct LdtkProject {
    /// Levels stored in the project
    #[serde(default)]
    pub levels: Vec<LdtkLevel>,
}

/// One level of an LDtk project
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdtkLevel {
    /// User-facing level name
    pub identifier: String,
    /// Layers from top to bottom, absent when levels are saved separately
    #[serde(default)]
    pub layer_instances: Option<Vec<LdtkLayer>>,
}

/// One layer instance within a level
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdtkLayer {
    /// Layer name
    #[serde(rename = "__identifier", default)]
    pub identifier: String,
    /// Layer type (`Tiles`, `AutoLayer`, `IntGrid`, `Entities`)
    #[serde(rename = "__type")]
    pub layer_type: String,
    /// Cell size in pixels
    #[serde(rename = "__gridSize")]
    pub grid_size: u32,
    /// Tileset image path relative to the project file
    #[serde(rename = "__tilesetRelPath", default)]
    pub tileset_rel_path: Option<String>,
    /// Manually placed tiles
    #[serde(default)]
    pub grid_tiles: Vec<LdtkTile>,
    /// Tiles placed by auto-layer rules
    #[serde(default)]
    pub auto_layer_tiles: Vec<LdtkTile>,
}

impl LdtkLayer {
    /// All tiles this layer places
    pub fn tiles(&self) -> impl Iterator<Item = &LdtkTile> {
        self.grid_tiles.iter().chain(&self.auto_layer_tiles)
    }
}

/// A placed tile instance
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LdtkTile {
    /// Pixel position of the tile within the tileset
    pub src: [u32; 2],
}

impl LdtkProject {
    /// Parse a project from JSON text
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is not a valid project
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read and parse a project file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read project",
            source: e,
        })?;
        Self::from_json(&text).map_err(|e| AlgorithmError::ProjectParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Find a level by identifier
    ///
    /// # Errors
    ///
    /// Returns `AlgorithmError::UnknownLevel` listing the known levels
    pub fn level(&self, identifier: &str) -> Result<&LdtkLevel> {
        self.levels
            .iter()
            .find(|level| level.identifier == identifier)
            .ok_or_else(|| AlgorithmError::UnknownLevel {
                identifier: identifier.to_string(),
                available: self
                    .levels
                    .iter()
                    .map(|level| level.identifier.clone())
                    .collect(),
            })
    }
}

/// Collect the tile images a level uses
///
/// Tilesets are resolved relative to `directory` and loaded once. Every
/// placement yields its own tile, so tiles placed more often are drawn
/// more often; fully transparent tiles are dropped.
///
/// # Errors
///
/// Returns an error if the level stores its layers externally or a tileset
/// cannot be loaded
pub fn level_tiles(level: &LdtkLevel, directory: &Path) -> Result<Vec<RgbaImage>> {
    let layers = level.layer_instances.as_ref().ok_or_else(|| {
        invalid_source(&format!(
            "level '{}' is stored in a separate file",
            level.identifier
        ))
    })?;

    let mut tilesets: HashMap<PathBuf, RgbaImage> = HashMap::new();
    let mut tiles = Vec::new();

    for layer in layers {
        let Some(relative) = layer.tileset_rel_path.as_deref() else {
            continue;
        };
        let path = directory.join(relative);

        if !tilesets.contains_key(&path) {
            let sheet = load_sheet(&path)?;
            tilesets.insert(path.clone(), sheet);
        }
        let Some(sheet) = tilesets.get(&path) else {
            continue;
        };

        let before = tiles.len();
        for tile in layer.tiles() {
            let [x, y] = tile.src;
            let image = crop(sheet, x, y, layer.grid_size, layer.grid_size);
            if !is_transparent(&image) {
                tiles.push(image);
            }
        }

        debug!(
            "layer '{}' ({}): {} tiles from {}",
            layer.identifier,
            layer.layer_type,
            tiles.len() - before,
            path.display()
        );
    }

    Ok(tiles)
}

/// Load a project file and collect the tiles of one level
///
/// # Errors
///
/// Returns an error if the project cannot be read, the level is missing, or
/// a tileset cannot be loaded
pub fn load_level_tiles(project_path: &Path, level: &str) -> Result<Vec<RgbaImage>> {
    let project = LdtkProject::from_file(project_path)?;
    let directory = project_path.parent().unwrap_or_else(|| Path::new(""));
    level_tiles(project.level(level)?, directory)
}
