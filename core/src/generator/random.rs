use rand::prelude::*;

use super::*;

/// Uniform source backed by a small seeded PRNG, so the same seed always
/// yields the same board.
#[derive(Clone, Debug)]
pub struct SeededSource {
    seed: u64,
    rng: SmallRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineSource for SeededSource {
    fn sample(&mut self, (size_x, size_y): Coord2) -> Coord2 {
        (
            self.rng.random_range(0..size_x),
            self.rng.random_range(0..size_y),
        )
    }
}
