//! Tile analysis: edge signatures, the tile catalog, and solve statistics

/// Tile catalog built from source images
pub mod catalog;
/// Edge signatures and tile identities computed from pixels
pub mod signature;
/// Round, backtrack, and timing counters for a solve
pub mod statistics;
