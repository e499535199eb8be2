//! Terminal progress display for a running solve

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::algorithm::observer::CollapseObserver;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::spatial::direction::Position;
use crate::spatial::grid::Grid;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} slots {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows collapsed slots out of the grid total, plus round and backtracks
///
/// Plugs into the engine as a [`CollapseObserver`].
pub struct ProgressObserver {
    bar: ProgressBar,
    backtracks: usize,
}

impl ProgressObserver {
    /// Create a progress bar for a grid with `slots` slots
    pub fn new(slots: usize) -> Self {
        let bar = ProgressBar::new(slots as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar, backtracks: 0 }
    }

    /// Create an observer that draws nothing
    pub fn hidden(slots: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(slots as u64);
        Self { bar, backtracks: 0 }
    }

    /// Slots shown as collapsed
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Rollbacks seen so far
    pub const fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl CollapseObserver for ProgressObserver {
    fn contradiction(&mut self, round: usize, retries: usize, _position: Option<Position>) {
        self.backtracks = retries;
        self.bar
            .set_message(format!("round {round}, {retries} backtracks"));
    }

    fn round_completed(&mut self, round: usize, grid: &Grid) {
        self.bar.set_position(grid.collapsed_count() as u64);
        self.bar
            .set_message(format!("round {round}, {} backtracks", self.backtracks));
    }
}
