//! CLI entry point for the wave function collapse level generator

use clap::Parser;
use wfcldtk::io::cli::{Cli, Generator};

fn main() -> wfcldtk::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.default_log_level()),
    )
    .init();

    Generator::new(cli).run().map(|_| ())
}
