//! Wave function collapse level generator
//!
//! Tiles are taken from an LDtk level or a sprite sheet. Each tile is
//! reduced to color signatures sampled along its four edges, and a grid of
//! slots is collapsed until every slot holds one tile whose edges match its
//! neighbors.

#![forbid(unsafe_code)]

/// Collapse engine, adjacency rules, and pivot selection
pub mod algorithm;
/// Edge signatures, tile catalog, and statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Directions, positions, and the slot grid
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
