//! Neighbor-constraint exclusion
//!
//! A candidate survives in a slot only if every present neighbor still
//! offers at least one tile whose facing edge carries the same signature.
//! Compatibility is precomputed once per catalog so that each check is a
//! bitset intersection test.

use std::collections::HashMap;

use crate::algorithm::bitset::TileBitset;
use crate::analysis::catalog::{Catalog, TileId};
use crate::analysis::signature::EdgeSignature;
use crate::io::error::{Result, invariant_violation};
use crate::spatial::direction::{Direction, Position};
use crate::spatial::grid::Grid;

/// For every tile and side, the tiles allowed on the other side of it
#[derive(Debug, Clone)]
pub struct AdjacencyRules {
    /// Indexed by `Direction::index`, then by tile
    compatible: [Vec<TileBitset>; 4],
    tile_count: usize,
}

impl AdjacencyRules {
    /// Derive compatibility sets from the catalog's edge signatures
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let tile_count = catalog.len();
        let compatible = Direction::ALL.map(|direction| {
            // Tiles grouped by the signature they show towards `direction`'s origin
            let mut facing: HashMap<EdgeSignature, TileBitset> = HashMap::new();
            for (id, tile) in catalog.iter().enumerate() {
                facing
                    .entry(tile.edge(direction.opposite()))
                    .or_insert_with(|| TileBitset::new(tile_count))
                    .insert(id);
            }

            catalog
                .iter()
                .map(|tile| {
                    facing
                        .get(&tile.edge(direction))
                        .cloned()
                        .unwrap_or_else(|| TileBitset::new(tile_count))
                })
                .collect()
        });

        Self {
            compatible,
            tile_count,
        }
    }

    /// Number of tiles the rules cover
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Tiles that may sit next to `tile` in `direction`
    pub fn compatible(&self, tile: TileId, direction: Direction) -> Option<&TileBitset> {
        self.compatible
            .get(direction.index())
            .and_then(|by_tile| by_tile.get(tile))
    }

    /// Whether `neighbor` still offers a partner for `tile` in `direction`
    pub fn supports(&self, tile: TileId, direction: Direction, neighbor: &TileBitset) -> bool {
        self.compatible(tile, direction)
            .is_some_and(|partners| partners.intersects(neighbor))
    }
}

/// Effect of constraining one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Narrowing {
    /// Slot that was constrained
    pub position: Position,
    /// Candidates before
    pub before: usize,
    /// Candidates after
    pub after: usize,
}

impl Narrowing {
    /// Some candidate was removed
    pub const fn is_narrowed(&self) -> bool {
        self.after < self.before
    }

    /// No candidate is left
    pub const fn is_broken(&self) -> bool {
        self.after == 0
    }
}

/// Tiles of a slot that every present neighbor still supports
///
/// Directions without a neighbor impose no constraint.
///
/// # Errors
///
/// Returns an invariant violation if the position is outside the grid
pub fn supported_tiles(grid: &Grid, position: Position, rules: &AdjacencyRules) -> Result<TileBitset> {
    let slot = grid
        .get(position)
        .ok_or_else(|| invariant_violation("supported_tiles", &format!("no slot at {position}")))?;

    let mut retained = TileBitset::new(slot.possible().capacity());
    for tile in slot.possible().iter() {
        let supported = grid
            .neighbors(position)
            .all(|(direction, neighbor)| rules.supports(tile, direction, neighbor.possible()));
        if supported {
            retained.insert(tile);
        }
    }

    Ok(retained)
}

/// Narrow a slot against its neighbors' current candidates
///
/// The slot's set is intersected with the supported tiles, so it never
/// grows.
///
/// # Errors
///
/// Returns an invariant violation if the position is outside the grid
pub fn constrain_slot(
    grid: &mut Grid,
    position: Position,
    rules: &AdjacencyRules,
) -> Result<Narrowing> {
    let before = grid.get(position).map_or(0, |slot| slot.entropy());
    let retained = supported_tiles(grid, position, rules)?;
    grid.restrict(position, &retained)?;
    let after = grid.get(position).map_or(0, |slot| slot.entropy());

    Ok(Narrowing {
        position,
        before,
        after,
    })
}
