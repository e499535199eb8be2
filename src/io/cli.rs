//! Command-line interface: load tiles, solve, render

use clap::Parser;
use image::RgbaImage;
use log::{debug, info};
use std::path::PathBuf;

use crate::algorithm::executor::{CollapseEngine, SolverConfig};
use crate::algorithm::observer::LogObserver;
use crate::analysis::catalog::Catalog;
use crate::analysis::statistics::StatisticsSummary;
use crate::io::configuration::{
    DEFAULT_CHECKPOINTS, DEFAULT_HEIGHT, DEFAULT_RETRY_BUDGET, DEFAULT_WIDTH,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressObserver;
use crate::io::project::load_level_tiles;
use crate::io::sheet::load_sheet_tiles;

#[derive(Parser, Debug)]
#[command(name = "wfcldtk")]
#[command(
    author,
    about = "Generate tile maps with wave function collapse from LDtk levels or sprite sheets",
    disable_version_flag = true
)]
/// Command-line arguments for the level generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Read tiles from LDtk project file
    #[arg(short, long, value_name = "PROJECT", requires = "level")]
    pub project: Option<PathBuf>,

    /// Use this level of the project as tile source
    #[arg(short, long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Read tiles from a sprite sheet instead of a project
    #[arg(
        short,
        long,
        value_name = "SHEET",
        conflicts_with = "project",
        requires = "cell_size"
    )]
    pub sheet: Option<PathBuf>,

    /// Sprite sheet cell size in pixels
    #[arg(short, long, value_name = "PIXELS")]
    pub cell_size: Option<u32>,

    /// Output width in tiles (not pixels)
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Output height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Color samples per tile edge
    #[arg(short = 'k', long, default_value_t = DEFAULT_CHECKPOINTS)]
    pub checkpoints: u32,

    /// Rollbacks allowed before giving up
    #[arg(short, long, default_value_t = DEFAULT_RETRY_BUDGET)]
    pub retries: usize,

    /// Random seed for reproducible generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show debugging output
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Show program version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Write the generated map to this PNG file
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver settings from the arguments
    pub const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            width: self.width,
            height: self.height,
            retry_budget: self.retries,
            seed: self.seed,
            debug: self.debug,
        }
    }

    /// Log filter used when `RUST_LOG` is not set
    pub const fn default_log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

/// Runs one generation from parsed arguments
pub struct Generator {
    cli: Cli,
}

impl Generator {
    /// Create a generator for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load tiles, solve, and render if an output path was given
    ///
    /// Returns the solve statistics, or `None` if only the version was
    /// requested.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, solving, or rendering fails
    pub fn run(&self) -> Result<Option<StatisticsSummary>> {
        if self.cli.version {
            // Allow print for the version banner
            #[allow(clippy::print_stdout)]
            {
                println!("This is wfcldtk version {}", env!("CARGO_PKG_VERSION"));
            }
            return Ok(None);
        }

        let catalog = Catalog::build(self.load_tiles()?, self.cli.checkpoints)?;
        info!(
            "superposition: {} tiles ({} distinct)",
            catalog.len(),
            catalog.distinct_identities()
        );
        if self.cli.debug {
            for tile in &catalog {
                debug!("  {tile}");
            }
        }

        let config = self.cli.solver_config();
        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressObserver::new(config.width * config.height));

        let mut engine = CollapseEngine::with_observer(&catalog, config, (LogObserver, progress))?;
        let outcome = engine.solve();
        if let (_, Some(progress)) = engine.observer() {
            progress.finish();
        }
        outcome?;

        let summary = engine.statistics().summary();
        info!("{summary}");

        if let Some(output) = &self.cli.output {
            export_grid_as_png(engine.grid(), &catalog, output)?;
            info!("wrote {}", output.display());
        }

        Ok(Some(summary))
    }

    fn load_tiles(&self) -> Result<Vec<RgbaImage>> {
        match (&self.cli.project, &self.cli.level, &self.cli.sheet) {
            (Some(project), Some(level), _) => load_level_tiles(project, level),
            (None, _, Some(sheet)) => {
                let cell_size = self.cli.cell_size.unwrap_or_default();
                load_sheet_tiles(sheet, cell_size)
            }
            _ => Err(invalid_parameter(
                "source",
                &"none",
                &"either -p <project> with -l <level> or -s <sheet> with -c <cell size> is required",
            )),
        }
    }
}
