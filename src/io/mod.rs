/// Command-line parsing and the generation runner
pub mod cli;
/// Defaults and limits
pub mod configuration;
/// Error types
pub mod error;
/// Rendering a grid to PNG
pub mod image;
/// Terminal progress bar
pub mod progress;
/// LDtk project loading
pub mod project;
/// Sprite sheet slicing
pub mod sheet;
