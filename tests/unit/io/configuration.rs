//! Tests for configuration defaults and limits

#[cfg(test)]
mod tests {
    use wfcldtk::io::configuration::{
        DEFAULT_CHECKPOINTS, DEFAULT_HEIGHT, DEFAULT_RETRY_BUDGET, DEFAULT_WIDTH,
        EDGE_SIGNATURE_BYTES, IDENTITY_BYTES, MAX_GRID_DIMENSION, PROGRESS_BAR_WIDTH,
        UNRESOLVED_COLOR,
    };

    // Tests the default output size and solve settings
    // Verified by changing constant values
    #[test]
    fn test_default_values() {
        assert_eq!((DEFAULT_WIDTH, DEFAULT_HEIGHT), (4, 4));
        assert_eq!(DEFAULT_CHECKPOINTS, 5);
        assert_eq!(DEFAULT_RETRY_BUDGET, 100);
    }

    // Tests fingerprint lengths in bytes
    // Verified by storing hex lengths instead of byte lengths
    #[test]
    fn test_fingerprint_lengths() {
        assert_eq!(EDGE_SIGNATURE_BYTES, 4);
        assert_eq!(IDENTITY_BYTES, 16);
    }

    // Tests maximum grid dimension value
    // Verified by reducing dimension limit
    #[test]
    fn test_max_grid_dimension() {
        assert_eq!(MAX_GRID_DIMENSION, 10_000);
    }

    // Tests unresolved slots render opaque red
    // Verified by making the color transparent
    #[test]
    fn test_unresolved_color() {
        assert_eq!(UNRESOLVED_COLOR, [255, 0, 0, 255]);
    }

    // Tests progress bar width value
    // Verified by changing bar width
    #[test]
    fn test_progress_bar_width() {
        assert_eq!(PROGRESS_BAR_WIDTH, 40);
    }
}
