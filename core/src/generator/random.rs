use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::*;

/// Uniform placement without replacement, driven by a seeded [`SmallRng`] so
/// that a seed together with the opening move always reproduces the same layout.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer {
    rng: SmallRng,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn select(&mut self, mut candidates: Vec<Coord2>, count: usize) -> Vec<Coord2> {
        candidates.shuffle(&mut self.rng);
        candidates.truncate(count);
        candidates
    }
}
