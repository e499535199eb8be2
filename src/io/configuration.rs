//! Algorithm constants and runtime configuration defaults

// Defaults for the command line and `SolverConfig::default`
/// Default output width in tiles
pub const DEFAULT_WIDTH: usize = 4;
/// Default output height in tiles
pub const DEFAULT_HEIGHT: usize = 4;
/// Default number of color samples taken along each tile edge
pub const DEFAULT_CHECKPOINTS: u32 = 5;
/// Default number of rollbacks allowed during one solve
pub const DEFAULT_RETRY_BUDGET: usize = 100;

// Fingerprint sizes, in digest bytes (hex text is twice as long)
/// Length of an edge signature (8 hex characters)
pub const EDGE_SIGNATURE_BYTES: usize = 4;
/// Length of a tile identity (32 hex characters)
pub const IDENTITY_BYTES: usize = 16;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Rendering
/// Fill color for slots that did not resolve to a single tile
pub const UNRESOLVED_COLOR: [u8; 4] = [255, 0, 0, 255];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
