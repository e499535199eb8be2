//! Spatial data structures
//!
//! This module contains:
//! - Compass directions and grid positions
//! - The slot grid with its checkpoint and rollback state

/// Directions and positions
pub mod direction;
/// Slot grid and entropy ordering
pub mod grid;

pub use direction::{Direction, Position};
pub use grid::{Grid, Slot};
