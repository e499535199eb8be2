/// Tile bitsets for slot possibilities and compatibility masks
pub mod bitset;
/// Collapse engine and solve orchestration
pub mod executor;
/// Hooks for watching a solve round by round
pub mod observer;
/// Adjacency rules and neighbor-driven narrowing
pub mod propagation;
/// Seeded random pivot choice
pub mod selection;
