use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Source of uniformly distributed integers for the random AI.
pub trait RandomSource {
    /// Draw an integer from the half-open range `low..high`.
    fn next_int(&mut self, low: usize, high: usize) -> usize;
}

/// [`RandomSource`] backed by a [`StdRng`].
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    /// Seed from OS entropy.
    pub fn new() -> Self {
        RngSource {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RngSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }
}

impl Default for RngSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for RngSource {
    fn next_int(&mut self, low: usize, high: usize) -> usize {
        self.rng.random_range(low..high)
    }
}
