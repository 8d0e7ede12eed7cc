//! Random number generator abstraction for determinism.
//!
//! In production, this wraps an OS-seeded CSPRNG. In tests,
//! a sequence-backed implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    /// Callers guarantee `min <= max`.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG: `StdRng` (ChaCha-based) seeded from the operating system.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Seeds a new generator from the OS entropy source.
    #[must_use]
    pub fn new() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl Default for SystemRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }
}
