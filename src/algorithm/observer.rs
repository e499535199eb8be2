//! Hooks for tracing a solve without touching its state
//!
//! The engine reports every notable event to a [`CollapseObserver`]. All
//! methods default to doing nothing, so implementations pick what they need.
//! Tuples and `Option`s of observers are observers too.

use log::{debug, trace, warn};

use crate::algorithm::propagation::Narrowing;
use crate::analysis::catalog::TileId;
use crate::spatial::direction::Position;
use crate::spatial::grid::Grid;

/// Receives solve events from the collapse engine
pub trait CollapseObserver {
    /// A round is about to mutate the grid
    fn round_started(&mut self, _round: usize, _grid: &Grid) {}

    /// The round's pivot slot was fixed to a tile
    fn pivot_fixed(&mut self, _round: usize, _position: Position, _tile: TileId) {}

    /// Propagation removed candidates from a slot
    fn slot_narrowed(&mut self, _round: usize, _narrowing: &Narrowing) {}

    /// The round left an empty slot and the grid was rolled back
    fn contradiction(&mut self, _round: usize, _retries: usize, _position: Option<Position>) {}

    /// The round finished without contradiction
    fn round_completed(&mut self, _round: usize, _grid: &Grid) {}

    /// Full grid state after a round, only sent in debug mode
    fn grid_dumped(&mut self, _round: usize, _grid: &Grid) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CollapseObserver for NoopObserver {}

/// Observer that forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl CollapseObserver for LogObserver {
    fn round_started(&mut self, round: usize, grid: &Grid) {
        trace!(
            "round {round}: {}/{} slots collapsed",
            grid.collapsed_count(),
            grid.len()
        );
    }

    fn pivot_fixed(&mut self, round: usize, position: Position, tile: TileId) {
        debug!("round {round}: pivot {position} fixed to tile {tile}");
    }

    fn slot_narrowed(&mut self, round: usize, narrowing: &Narrowing) {
        trace!(
            "round {round}: {} narrowed {} -> {}",
            narrowing.position, narrowing.before, narrowing.after
        );
    }

    fn contradiction(&mut self, round: usize, retries: usize, position: Option<Position>) {
        match position {
            Some(position) => {
                warn!("round {round}: contradiction at {position}, rollback #{retries}");
            }
            None => warn!("round {round}: contradiction, rollback #{retries}"),
        }
    }

    fn grid_dumped(&mut self, round: usize, grid: &Grid) {
        debug!("entropy after round {round}:\n{grid}");
    }
}

impl<O: CollapseObserver> CollapseObserver for Option<O> {
    fn round_started(&mut self, round: usize, grid: &Grid) {
        if let Some(observer) = self {
            observer.round_started(round, grid);
        }
    }

    fn pivot_fixed(&mut self, round: usize, position: Position, tile: TileId) {
        if let Some(observer) = self {
            observer.pivot_fixed(round, position, tile);
        }
    }

    fn slot_narrowed(&mut self, round: usize, narrowing: &Narrowing) {
        if let Some(observer) = self {
            observer.slot_narrowed(round, narrowing);
        }
    }

    fn contradiction(&mut self, round: usize, retries: usize, position: Option<Position>) {
        if let Some(observer) = self {
            observer.contradiction(round, retries, position);
        }
    }

    fn round_completed(&mut self, round: usize, grid: &Grid) {
        if let Some(observer) = self {
            observer.round_completed(round, grid);
        }
    }

    fn grid_dumped(&mut self, round: usize, grid: &Grid) {
        if let Some(observer) = self {
            observer.grid_dumped(round, grid);
        }
    }
}

impl<A: CollapseObserver, B: CollapseObserver> CollapseObserver for (A, B) {
    fn round_started(&mut self, round: usize, grid: &Grid) {
        self.0.round_started(round, grid);
        self.1.round_started(round, grid);
    }

    fn pivot_fixed(&mut self, round: usize, position: Position, tile: TileId) {
        self.0.pivot_fixed(round, position, tile);
        self.1.pivot_fixed(round, position, tile);
    }

    fn slot_narrowed(&mut self, round: usize, narrowing: &Narrowing) {
        self.0.slot_narrowed(round, narrowing);
        self.1.slot_narrowed(round, narrowing);
    }

    fn contradiction(&mut self, round: usize, retries: usize, position: Option<Position>) {
        self.0.contradiction(round, retries, position);
        self.1.contradiction(round, retries, position);
    }

    fn round_completed(&mut self, round: usize, grid: &Grid) {
        self.0.round_completed(round, grid);
        self.1.round_completed(round, grid);
    }

    fn grid_dumped(&mut self, round: usize, grid: &Grid) {
        self.0.grid_dumped(round, grid);
        self.1.grid_dumped(round, grid);
    }
}
