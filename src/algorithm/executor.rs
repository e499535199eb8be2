use std::time::Instant;

use crate::{
    algorithm::observer::{CollapseObserver, NoopObserver},
    algorithm::propagation::{AdjacencyRules, constrain_slot},
    algorithm::selection::PivotSelector,
    analysis::catalog::Catalog,
    analysis::statistics::SolveStatistics,
    io::configuration::{
        DEFAULT_HEIGHT, DEFAULT_RETRY_BUDGET, DEFAULT_WIDTH, MAX_GRID_DIMENSION,
    },
    io::error::{AlgorithmError, Result, invalid_parameter, invalid_source, invariant_violation},
    spatial::direction::Position,
    spatial::grid::Grid,
};

/// Solve parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Output width in tiles
    pub width: usize,
    /// Output height in tiles
    pub height: usize,
    /// Rollbacks allowed over the whole solve
    pub retry_budget: usize,
    /// Seed for pivot selection, OS entropy when absent
    pub seed: Option<u64>,
    /// Send per-round grid dumps to the observer
    pub debug: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            retry_budget: DEFAULT_RETRY_BUDGET,
            seed: None,
            debug: false,
        }
    }
}

impl SolverConfig {
    /// Check the grid dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or above `MAX_GRID_DIMENSION`
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

/// What a single round did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A pivot was fixed and propagation left the grid consistent
    Advanced,
    /// The round broke a slot and the grid was rolled back
    Retried,
    /// Every slot holds exactly one tile
    Collapsed,
}

/// Wave function collapse over a grid of slots
///
/// Each round checkpoints the grid, fixes the lowest-entropy open slot to a
/// random candidate and narrows every other open slot against its
/// neighbors in the same entropy order. A round that leaves an empty slot
/// is rolled back and retried until the retry budget is spent.
///
/// Propagation is a single pass per round: a slot narrowed late in the
/// sweep does not re-narrow slots visited before it. The next round picks
/// that up.
pub struct CollapseEngine<'a, O = NoopObserver> {
    catalog: &'a Catalog,
    rules: AdjacencyRules,
    grid: Grid,
    selector: PivotSelector,
    config: SolverConfig,
    observer: O,
    round: usize,
    retries: usize,
}

impl<'a> CollapseEngine<'a, NoopObserver> {
    /// Create an engine that reports to nobody
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the catalog is
    /// empty
    pub fn new(catalog: &'a Catalog, config: SolverConfig) -> Result<Self> {
        Self::with_observer(catalog, config, NoopObserver)
    }
}

impl<'a, O: CollapseObserver> CollapseEngine<'a, O> {
    /// Create an engine that reports solve events to `observer`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the catalog is
    /// empty
    pub fn with_observer(catalog: &'a Catalog, config: SolverConfig, observer: O) -> Result<Self> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(invalid_source(&"tile catalog is empty"));
        }

        let mut grid = Grid::new(config.width, config.height);
        grid.populate(catalog);

        Ok(Self {
            catalog,
            rules: AdjacencyRules::from_catalog(catalog),
            grid,
            selector: PivotSelector::from_seed(config.seed),
            config,
            observer,
            round: 0,
            retries: 0,
        })
    }

    /// Run rounds until the grid collapses
    ///
    /// # Errors
    ///
    /// Returns `AlgorithmError::Contradiction` once the retry budget is
    /// exhausted, or an invariant violation on internal inconsistency
    pub fn solve(&mut self) -> Result<()> {
        while self.execute_round()? != RoundOutcome::Collapsed {}
        Ok(())
    }

    /// Run one round: checkpoint, fix a pivot, narrow, check
    ///
    /// Rounds are atomic; calling this repeatedly is equivalent to `solve`
    /// and leaves room to stop between rounds.
    ///
    /// # Errors
    ///
    /// Returns `AlgorithmError::Contradiction` once the retry budget is
    /// exhausted, or an invariant violation on internal inconsistency
    pub fn execute_round(&mut self) -> Result<RoundOutcome> {
        if self.grid.is_collapsed() {
            return Ok(RoundOutcome::Collapsed);
        }

        let started = Instant::now();
        self.round += 1;
        let round = self.round;

        self.grid.checkpoint();
        self.observer.round_started(round, &self.grid);

        let order = self.grid.order_by_entropy().to_vec();
        let mut pivot: Option<Position> = None;

        for position in order {
            let collapsed = self
                .grid
                .get(position)
                .ok_or_else(|| invariant_violation("execute_round", &format!("no slot at {position}")))?
                .is_collapsed();
            if collapsed {
                continue;
            }

            if pivot.is_none() {
                self.fix_pivot(round, position)?;
                pivot = Some(position);
            } else {
                let narrowing = constrain_slot(&mut self.grid, position, &self.rules)?;
                if narrowing.is_narrowed() {
                    self.observer.slot_narrowed(round, &narrowing);
                }
            }
        }

        self.grid.record_round(started.elapsed());

        if self.grid.is_broken() {
            let position = self.grid.first_broken();
            if self.retries >= self.config.retry_budget {
                return Err(AlgorithmError::Contradiction {
                    round,
                    retries: self.retries,
                    position,
                });
            }
            self.retries += 1;
            self.grid.rollback();
            self.observer.contradiction(round, self.retries, position);
            return Ok(RoundOutcome::Retried);
        }

        self.observer.round_completed(round, &self.grid);
        if self.config.debug {
            self.observer.grid_dumped(round, &self.grid);
        }

        if self.grid.is_collapsed() {
            Ok(RoundOutcome::Collapsed)
        } else {
            Ok(RoundOutcome::Advanced)
        }
    }

    /// Fix the pivot to a tile drawn uniformly from its candidates
    ///
    /// The pivot is not narrowed first, so the drawn tile may clash with a
    /// neighbor. An open neighbor is then broken by the rest of the sweep.
    fn fix_pivot(&mut self, round: usize, position: Position) -> Result<()> {
        let candidates = self
            .grid
            .get(position)
            .map(|slot| slot.possible().clone())
            .ok_or_else(|| invariant_violation("fix_pivot", &format!("no slot at {position}")))?;

        let tile = self
            .selector
            .choose(&candidates)
            .ok_or_else(|| invariant_violation("fix_pivot", &format!("empty pivot at {position}")))?;

        self.grid.fix(position, tile)?;
        self.observer.pivot_fixed(round, position, tile);
        Ok(())
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Take the grid out of the engine
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Catalog the slots refer to
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Compatibility sets derived from the catalog
    pub const fn rules(&self) -> &AdjacencyRules {
        &self.rules
    }

    /// Statistics gathered so far
    pub const fn statistics(&self) -> &SolveStatistics {
        self.grid.statistics()
    }

    /// Rounds started so far, retried ones included
    pub const fn round(&self) -> usize {
        self.round
    }

    /// Rollbacks used from the budget
    pub const fn retries(&self) -> usize {
        self.retries
    }

    /// The observer receiving solve events
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Configuration this engine runs with
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }
}
