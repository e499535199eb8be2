//! Immutable tile catalog built once before solving
//!
//! Slots never hold tiles directly; they hold [`TileId`]s, the position of a
//! tile within its catalog.

use image::RgbaImage;
use std::collections::HashSet;
use std::fmt;

use crate::algorithm::bitset::TileBitset;
use crate::analysis::signature::{EdgeSignature, TileIdentity, edge_signatures, tile_identity};
use crate::io::error::{Result, invalid_parameter, invalid_source};
use crate::spatial::direction::Direction;

/// Index of a tile within its catalog
pub type TileId = usize;

/// A tile: identity, four edge signatures and optionally its pixels
#[derive(Debug, Clone)]
pub struct Tile {
    identity: TileIdentity,
    edges: [EdgeSignature; 4],
    image: Option<RgbaImage>,
}

impl Tile {
    /// Derive identity and signatures from pixel data
    ///
    /// # Errors
    ///
    /// Returns an error if `checkpoints` is zero or the image has no pixels
    pub fn from_image(image: RgbaImage, checkpoints: u32) -> Result<Self> {
        let edges = edge_signatures(&image, checkpoints)?;
        Ok(Self {
            identity: tile_identity(&image),
            edges,
            image: Some(image),
        })
    }

    /// Build a tile from precomputed fingerprints, without pixels
    ///
    /// Signatures are given in [`Direction::ALL`] order.
    pub const fn from_signatures(identity: TileIdentity, edges: [EdgeSignature; 4]) -> Self {
        Self {
            identity,
            edges,
            image: None,
        }
    }

    /// Content fingerprint
    pub const fn identity(&self) -> TileIdentity {
        self.identity
    }

    /// Signature of the given side
    pub const fn edge(&self, direction: Direction) -> EdgeSignature {
        let [north, east, south, west] = self.edges;
        match direction {
            Direction::North => north,
            Direction::East => east,
            Direction::South => south,
            Direction::West => west,
        }
    }

    /// Pixels, if the tile was built from an image
    pub const fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// Whether `other` may sit next to this tile in `direction`
    pub fn fits(&self, direction: Direction, other: &Self) -> bool {
        self.edge(direction) == other.edge(direction.opposite())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for direction in Direction::ALL {
            write!(f, "{}:{} ", direction.label(), self.edge(direction))?;
        }
        write!(f, "<{}>]", self.identity)
    }
}

/// Ordered, immutable collection of candidate tiles
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tiles: Vec<Tile>,
}

impl Catalog {
    /// Build a catalog from tile images, keeping their order
    ///
    /// Duplicated images are kept; they share an identity.
    ///
    /// # Errors
    ///
    /// Returns an error if `checkpoints` is zero or any image has no pixels
    pub fn build<I>(images: I, checkpoints: u32) -> Result<Self>
    where
        I: IntoIterator<Item = RgbaImage>,
    {
        if checkpoints == 0 {
            return Err(invalid_parameter(
                "checkpoints",
                &checkpoints,
                &"at least one sample per edge is required",
            ));
        }

        let tiles = images
            .into_iter()
            .map(|image| Tile::from_image(image, checkpoints))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { tiles })
    }

    /// Wrap already annotated tiles
    pub const fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the catalog holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile by index
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Iterate tiles in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Set of every tile in the catalog
    pub fn superposition(&self) -> TileBitset {
        TileBitset::all(self.tiles.len())
    }

    /// Number of different identities
    pub fn distinct_identities(&self) -> usize {
        self.tiles
            .iter()
            .map(Tile::identity)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Common pixel size of all tiles
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty, a tile has no pixels, or
    /// the tiles differ in size
    pub fn tile_size(&self) -> Result<(u32, u32)> {
        let mut sizes = self.tiles.iter().enumerate().map(|(id, tile)| {
            tile.image()
                .map(RgbaImage::dimensions)
                .ok_or_else(|| invalid_source(&format!("tile {id} has no image data")))
        });

        let first = sizes
            .next()
            .ok_or_else(|| invalid_source(&"catalog contains no tiles"))??;

        for size in sizes {
            let size = size?;
            if size != first {
                return Err(invalid_source(&format!(
                    "tiles differ in size: {}x{} and {}x{}",
                    first.0, first.1, size.0, size.1
                )));
            }
        }

        Ok(first)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
