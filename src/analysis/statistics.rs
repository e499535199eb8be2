//! Solve statistics: superposition size, rounds, backtracks and round timings

use std::fmt;
use std::time::Duration;

/// Running counters kept by the grid while a solve progresses
///
/// Purely informational. Nothing in the solver reads these values back.
#[derive(Debug, Clone, Default)]
pub struct SolveStatistics {
    superposition: usize,
    rounds: usize,
    backtracks: usize,
    round_durations: Vec<Duration>,
}

impl SolveStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the number of tiles every slot started with
    pub const fn set_superposition(&mut self, tiles: usize) {
        self.superposition = tiles;
    }

    /// Record one finished round and its duration
    pub fn record_round(&mut self, duration: Duration) {
        self.rounds += 1;
        self.round_durations.push(duration);
    }

    /// Record one rollback to the last checkpoint
    pub const fn record_backtrack(&mut self) {
        self.backtracks += 1;
    }

    /// Number of tiles each slot started with
    pub const fn superposition(&self) -> usize {
        self.superposition
    }

    /// Total rounds, retried ones included
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// Total rollbacks
    pub const fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Duration of each round in order
    pub fn round_durations(&self) -> &[Duration] {
        &self.round_durations
    }

    /// Condense the counters into a read-only summary
    pub fn summary(&self) -> StatisticsSummary {
        let elapsed: Duration = self.round_durations.iter().sum();
        let slowest_round = self
            .round_durations
            .iter()
            .max()
            .copied()
            .unwrap_or_default();
        let mean_round = u32::try_from(self.round_durations.len())
            .ok()
            .filter(|&rounds| rounds > 0)
            .map_or(Duration::ZERO, |rounds| elapsed / rounds);

        StatisticsSummary {
            superposition: self.superposition,
            rounds: self.rounds,
            backtracks: self.backtracks,
            elapsed,
            mean_round,
            slowest_round,
        }
    }
}

/// Snapshot of the statistics at the end of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsSummary {
    /// Tiles in the superposition
    pub superposition: usize,
    /// Rounds executed
    pub rounds: usize,
    /// Rollbacks performed
    pub backtracks: usize,
    /// Time spent in rounds
    pub elapsed: Duration,
    /// Average round duration
    pub mean_round: Duration,
    /// Longest round duration
    pub slowest_round: Duration,
}

impl fmt::Display for StatisticsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "superposition: {} tiles, rounds: {}, backtracks: {}, elapsed: {:?} (mean {:?}, slowest {:?})",
            self.superposition,
            self.rounds,
            self.backtracks,
            self.elapsed,
            self.mean_round,
            self.slowest_round
        )
    }
}
