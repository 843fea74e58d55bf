//! Random source injection.
//!
//! Every draw in this crate goes through `&mut dyn rand::RngCore`, so callers choose between the
//! ambient thread RNG, a seeded [`StdRng`], or a [`SequenceRng`] that replays fixed draws.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of independent random streams, one per batch worker
pub trait RngProvider: Send + Sync {
    type Rng: RngCore + Send;

    /// The stream for worker `worker`
    fn worker_rng(&self, worker: usize) -> Self::Rng;
}

/// Streams seeded from OS entropy; never reproducible
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRngProvider;

impl RngProvider for DefaultRngProvider {
    type Rng = StdRng;

    fn worker_rng(&self, _worker: usize) -> StdRng {
        StdRng::from_entropy()
    }
}

/// Streams derived from one base seed: worker `i` is seeded `base_seed + i`
#[derive(Debug, Clone, Copy)]
pub struct SeededRngProvider {
    base_seed: u64,
}

impl SeededRngProvider {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }
}

impl RngProvider for SeededRngProvider {
    type Rng = StdRng;

    fn worker_rng(&self, worker: usize) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(worker as u64))
    }
}

/// An entropy-seeded RNG
pub fn create_rng() -> StdRng {
    DefaultRngProvider.worker_rng(0)
}

/// An RNG that replays the same draws for the same `seed`
pub fn create_seeded_rng(seed: u64) -> StdRng {
    SeededRngProvider::new(seed).worker_rng(0)
}

/// Draw one uniform value in `[0, 1)`.
pub fn uniform(rng: &mut dyn RngCore) -> f64 {
    rng.r#gen::<f64>()
}

/// A random source that replays a fixed, cycling sequence of uniform draws.
///
/// Each value must lie in `[0, 1)`. A value `r` is encoded so that [`uniform`] returns `r`
/// (to 53 bits of precision).
#[derive(Debug, Clone)]
pub struct SequenceRng {
    draws: Vec<u64>,
    position: usize,
}

impl SequenceRng {
    /// Create a sequence source from uniform draws in `[0, 1)`
    pub fn new(values: &[f64]) -> Self {
        let draws = values
            .iter()
            .map(|&r| {
                let clamped = r.clamp(0.0, 1.0 - f64::EPSILON);
                ((clamped * (1u64 << 53) as f64) as u64) << 11
            })
            .collect::<Vec<_>>();
        Self { draws, position: 0 }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        if self.draws.is_empty() {
            return 0;
        }
        let value = self.draws[self.position % self.draws.len()];
        self.position += 1;
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
