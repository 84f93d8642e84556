//! Seeded random number generator.
//!
//! Every random decision in the simulation (spawn rolls, fire rolls, shield rolls,
//! boss pattern shuffles) draws from this one resource, so a fixed seed replays a
//! level tick for tick.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[derive(Resource, Debug)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn from_tunable_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }

    /// Bernoulli trial. Probabilities outside [0, 1] are clamped.
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        let p = f64::from(p).clamp(0.0, 1.0);
        self.rng.gen_bool(p)
    }

    /// Uniform f32 in `[min, max)`; returns `min` for an empty range.
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    #[inline]
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
