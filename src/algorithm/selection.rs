use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::bitset::TileBitset;
use crate::analysis::catalog::TileId;

/// Uniform pivot tile choice, the only source of randomness in a solve
#[derive(Debug, Clone)]
pub struct PivotSelector {
    rng: StdRng,
}

impl PivotSelector {
    /// Create a selector with a fixed seed for reproducible solves
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector from an optional seed, using OS entropy without one
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(
            || Self {
                rng: StdRng::from_os_rng(),
            },
            Self::new,
        )
    }

    /// Draw one tile uniformly from the candidates
    ///
    /// Returns `None` for an empty set.
    pub fn choose(&mut self, candidates: &TileBitset) -> Option<TileId> {
        let count = candidates.count();
        if count == 0 {
            return None;
        }
        let pick = self.rng.random_range(0..count);
        candidates.nth(pick)
    }
}
