use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const FLUCTUATION_MIN: f64 = 0.95;
pub const FLUCTUATION_MAX: f64 = 1.05;

/// Source of the multiplicative market-noise factor applied to house estimates.
///
/// The noise is intentional: estimates vary within ±5% between identical requests.
/// Implementations must return values within [`FLUCTUATION_MIN`, `FLUCTUATION_MAX`].
pub trait MarketNoise: Send + Sync {
    fn fluctuation(&self) -> f64;
}

/// Draws from the thread-local RNG. Default for the service.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngNoise;

impl MarketNoise for ThreadRngNoise {
    fn fluctuation(&self) -> f64 {
        rand::thread_rng().gen_range(FLUCTUATION_MIN..=FLUCTUATION_MAX)
    }
}

/// Reproducible sequence of draws for demos and tests.
#[derive(Debug)]
pub struct SeededNoise {
    rng: Mutex<StdRng>,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl MarketNoise for SeededNoise {
    fn fluctuation(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(FLUCTUATION_MIN..=FLUCTUATION_MAX)
    }
}

/// Constant factor, clamped into the allowed band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl FixedNoise {
    pub const NEUTRAL: FixedNoise = FixedNoise(1.0);
}

impl MarketNoise for FixedNoise {
    fn fluctuation(&self) -> f64 {
        self.0.clamp(FLUCTUATION_MIN, FLUCTUATION_MAX)
    }
}

pub fn noise_from_seed(seed: Option<u64>) -> Arc<dyn MarketNoise> {
    match seed {
        Some(seed) => Arc::new(SeededNoise::new(seed)),
        None => Arc::new(ThreadRngNoise),
    }
}
