//! Grid of slots holding the candidate tiles for every output cell
//!
//! Slots live in a dense row-major array indexed `[y, x]`, so a neighbor
//! lookup is a bounds comparison rather than a map probe. Each slot owns its
//! candidate set and a snapshot of it taken at the last checkpoint, which is
//! what makes whole-grid rollback cheap.

use ndarray::Array2;
use std::fmt;
use std::time::Duration;

use crate::algorithm::bitset::TileBitset;
use crate::analysis::catalog::{Catalog, TileId};
use crate::analysis::statistics::SolveStatistics;
use crate::io::error::{Result, invariant_violation};
use crate::spatial::direction::{Direction, Position};

/// One output cell and the tiles that may still be placed there
#[derive(Debug, Clone)]
pub struct Slot {
    possible: TileBitset,
    snapshot: TileBitset,
    position: Position,
}

impl Slot {
    /// Create a slot with the given candidates
    pub fn new(position: Position, possible: TileBitset) -> Self {
        Self {
            snapshot: possible.clone(),
            possible,
            position,
        }
    }

    /// Fixed grid coordinate of this slot
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Tiles still possible here
    pub const fn possible(&self) -> &TileBitset {
        &self.possible
    }

    /// Candidates as of the last checkpoint
    pub const fn snapshot(&self) -> &TileBitset {
        &self.snapshot
    }

    /// Number of tiles still possible
    pub fn entropy(&self) -> usize {
        self.possible.count()
    }

    /// Exactly one tile left
    pub fn is_collapsed(&self) -> bool {
        self.possible.single_tile().is_some()
    }

    /// No tile left
    pub fn is_broken(&self) -> bool {
        self.possible.is_empty()
    }

    /// The resolved tile, if collapsed
    pub fn tile(&self) -> Option<TileId> {
        self.possible.single_tile()
    }

    fn checkpoint(&mut self) {
        self.snapshot.clone_from(&self.possible);
    }

    fn rollback(&mut self) {
        self.possible.clone_from(&self.snapshot);
    }
}

/// The mutable solving state: every slot plus running statistics
#[derive(Debug, Clone)]
pub struct Grid {
    slots: Array2<Slot>,
    /// Auxiliary traversal list reused by `order_by_entropy`
    order: Vec<Position>,
    width: usize,
    height: usize,
    statistics: SolveStatistics,
}

impl Grid {
    /// Create a grid whose slots have no candidates yet
    ///
    /// Zero-sized grids are valid and count as collapsed.
    pub fn new(width: usize, height: usize) -> Self {
        let slots = Array2::from_shape_fn((height, width), |(y, x)| {
            Slot::new(Position::new(x, y), TileBitset::new(0))
        });

        Self {
            slots,
            order: Vec::with_capacity(width * height),
            width,
            height,
            statistics: SolveStatistics::new(),
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid has no slots at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Put the full catalog into every slot and its snapshot
    pub fn populate(&mut self, catalog: &Catalog) {
        let superposition = catalog.superposition();
        for slot in &mut self.slots {
            slot.possible.clone_from(&superposition);
            slot.snapshot.clone_from(&superposition);
        }
        self.statistics.set_superposition(catalog.len());
    }

    /// Slot at a position, `None` outside the grid
    pub fn get(&self, position: Position) -> Option<&Slot> {
        self.slots.get((position.y, position.x))
    }

    /// Iterate slots in row-major order
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Every slot holds exactly one tile
    pub fn is_collapsed(&self) -> bool {
        self.slots.iter().all(Slot::is_collapsed)
    }

    /// Some slot holds no tile
    pub fn is_broken(&self) -> bool {
        self.slots.iter().any(Slot::is_broken)
    }

    /// Number of slots holding exactly one tile
    pub fn collapsed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_collapsed()).count()
    }

    /// First slot without candidates, in row-major order
    pub fn first_broken(&self) -> Option<Position> {
        self.slots
            .iter()
            .find(|slot| slot.is_broken())
            .map(Slot::position)
    }

    /// Position adjacent to `position`, `None` at the grid boundary
    pub fn neighbor_position(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .shift(direction)
            .filter(|next| next.x < self.width && next.y < self.height)
    }

    /// Slot adjacent to `position`, `None` at the grid boundary
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<&Slot> {
        self.neighbor_position(position, direction)
            .and_then(|next| self.get(next))
    }

    /// All present neighbors of a position with the direction they lie in
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Direction, &Slot)> {
        Direction::ALL.into_iter().filter_map(move |direction| {
            self.neighbor(position, direction)
                .map(|slot| (direction, slot))
        })
    }

    /// Save every slot's candidates as its snapshot
    pub fn checkpoint(&mut self) {
        for slot in &mut self.slots {
            slot.checkpoint();
        }
    }

    /// Restore every slot's candidates from its snapshot
    pub fn rollback(&mut self) {
        for slot in &mut self.slots {
            slot.rollback();
        }
        self.statistics.record_backtrack();
    }

    /// Slot positions sorted by ascending entropy
    ///
    /// Ties keep row-major order, so the result only depends on the
    /// candidate counts.
    pub fn order_by_entropy(&mut self) -> &[Position] {
        self.order.clear();
        self.order.extend(self.slots.iter().map(Slot::position));

        let slots = &self.slots;
        self.order.sort_by_key(|position| {
            slots
                .get((position.y, position.x))
                .map_or(0, Slot::entropy)
        });

        &self.order
    }

    /// Reduce a slot to a single one of its candidates
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the position is outside the grid
    /// or the tile is not among the slot's candidates
    pub fn fix(&mut self, position: Position, tile: TileId) -> Result<()> {
        let slot = self.slot_mut(position, "fix")?;
        if !slot.possible.contains(tile) {
            return Err(invariant_violation(
                "fix",
                &format!("tile {tile} is not possible at {position}"),
            ));
        }
        let capacity = slot.possible.capacity();
        slot.possible = TileBitset::single(tile, capacity);
        Ok(())
    }

    /// Intersect a slot's candidates with `allowed`
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the position is outside the grid
    pub fn restrict(&mut self, position: Position, allowed: &TileBitset) -> Result<()> {
        let slot = self.slot_mut(position, "restrict")?;
        slot.possible.intersect_with(allowed);
        Ok(())
    }

    /// Resolved tile at a position, if that slot is collapsed
    pub fn tile_at(&self, position: Position) -> Option<TileId> {
        self.get(position).and_then(Slot::tile)
    }

    /// Resolved tile of every slot in row-major order
    pub fn resolved(&self) -> Vec<Option<TileId>> {
        self.slots.iter().map(Slot::tile).collect()
    }

    /// Statistics gathered so far
    pub const fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }

    /// Account one finished round
    pub fn record_round(&mut self, duration: Duration) {
        self.statistics.record_round(duration);
    }

    fn slot_mut(&mut self, position: Position, operation: &'static str) -> Result<&mut Slot> {
        let (width, height) = (self.width, self.height);
        self.slots
            .get_mut((position.y, position.x))
            .ok_or_else(|| {
                invariant_violation(
                    operation,
                    &format!("{position} is outside the {width}x{height} grid"),
                )
            })
    }
}

impl fmt::Display for Grid {
    /// Entropy map, one text row per grid row
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.slots.rows() {
            let line = row
                .iter()
                .map(|slot| slot.entropy().to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
