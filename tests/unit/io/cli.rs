//! Tests for argument parsing and the generation runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;
    use wfcldtk::AlgorithmError;
    use wfcldtk::io::cli::{Cli, Generator};

    // Two 4px cells, red and blue, side by side
    fn write_sheet(dir: &Path) -> String {
        let sheet = RgbaImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let path = dir.join("sheet.png");
        sheet.save(&path).expect("Failed to write sheet");
        path.to_string_lossy().into_owned()
    }

    // Tests default values when only a source is given
    // Verified by changing the default width
    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["wfcldtk", "-s", "sheet.png", "-c", "16"]);
        assert_eq!(cli.width, 4);
        assert_eq!(cli.height, 4);
        assert_eq!(cli.checkpoints, 5);
        assert_eq!(cli.retries, 100);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.cell_size, Some(16));
        assert!(cli.output.is_none());
        assert!(cli.should_show_progress());
        assert_eq!(cli.default_log_level(), "info");
    }

    // Tests every flag lands in the solver configuration
    // Verified by swapping width and height in solver_config
    #[test]
    fn test_flags_reach_solver_config() {
        let cli = Cli::parse_from([
            "wfcldtk", "-p", "world.ldtk", "-l", "Level_0", "-W", "7", "-H", "3", "-k", "4",
            "-r", "9", "--seed", "12", "-d", "-q", "out.png",
        ]);
        let config = cli.solver_config();
        assert_eq!((config.width, config.height), (7, 3));
        assert_eq!(config.retry_budget, 9);
        assert_eq!(config.seed, Some(12));
        assert!(config.debug);
        assert_eq!(cli.checkpoints, 4);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.default_log_level(), "debug");
        assert_eq!(cli.level.as_deref(), Some("Level_0"));
        assert_eq!(cli.output.as_deref(), Some(Path::new("out.png")));
    }

    // Tests argument relations between the two sources
    // Verified by removing `requires = "cell_size"`
    #[test]
    fn test_source_argument_relations() {
        assert!(Cli::try_parse_from(["wfcldtk", "-s", "sheet.png"]).is_err());
        assert!(Cli::try_parse_from(["wfcldtk", "-p", "world.ldtk"]).is_err());
        assert!(
            Cli::try_parse_from([
                "wfcldtk", "-p", "world.ldtk", "-l", "L", "-s", "sheet.png", "-c", "8"
            ])
            .is_err()
        );
    }

    // Tests the version flag short-circuits generation
    // Verified by ignoring the version flag
    #[test]
    fn test_version_only() {
        let cli = Cli::parse_from(["wfcldtk", "-v"]);
        let result = Generator::new(cli).run();
        assert!(matches!(result, Ok(None)));
    }

    // Tests a missing tile source is reported
    // Verified by defaulting to an empty catalog
    #[test]
    fn test_missing_source() {
        let cli = Cli::parse_from(["wfcldtk", "-q"]);
        let result = Generator::new(cli).run();
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter { .. })
        ));
    }

    // Tests a full run from sheet to PNG
    // Verified by skipping the export step
    #[test]
    fn test_run_sheet_to_png() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let sheet = write_sheet(temp_dir.path());
        let output = temp_dir.path().join("out").join("map.png");
        let output_arg = output.to_string_lossy().into_owned();

        let cli = Cli::parse_from([
            "wfcldtk",
            "-q",
            "-s",
            sheet.as_str(),
            "-c",
            "4",
            "-k",
            "2",
            "-W",
            "3",
            "-H",
            "2",
            "--seed",
            "5",
            output_arg.as_str(),
        ]);
        let summary = Generator::new(cli)
            .run()
            .expect("uniform tiles always fit")
            .expect("statistics after a solve");

        assert_eq!(summary.superposition, 2);
        assert_eq!(summary.backtracks, 0);

        let rendered = image::open(&output).expect("output written").to_rgba8();
        assert_eq!(rendered.dimensions(), (12, 8));
        // Solid tiles only fit next to themselves, so the map is one color
        let first = *rendered.get_pixel(0, 0);
        assert!(rendered.pixels().all(|pixel| *pixel == first));
    }

    // Tests load errors propagate out of the runner
    // Verified by returning an empty tile list for unreadable sheets
    #[test]
    fn test_run_missing_sheet() {
        let cli = Cli::parse_from(["wfcldtk", "-q", "-s", "does/not/exist.png", "-c", "4"]);
        let result = Generator::new(cli).run();
        assert!(matches!(result, Err(AlgorithmError::ImageLoad { .. })));
    }
}
