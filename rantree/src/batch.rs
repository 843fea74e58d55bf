//! Generating many structures at once, optionally across threads.

use std::panic;

use rand::RngCore;
use tracing::debug;

use crate::error::GenResult;
use crate::factory::NodeGenerator;
use crate::node::Node;
use crate::rng::{DefaultRngProvider, RngProvider, SeededRngProvider};
use crate::shape::Shape;
use crate::util::try_fill_with;

/// Configuration for batch generation
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of threads to use for parallel generation
    pub num_threads: usize,
    /// Below this many structures, generation stays on the calling thread
    pub batch_size: usize,
    /// Whether to enable parallel generation
    pub enabled: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            batch_size: 10,
            enabled: true,
        }
    }
}

impl BatchConfig {
    /// Sequential generation only
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Generate `count` structures.
///
/// Each thread owns its RNG, seeded `seed + thread_id` when a seed is given. Results are ordered
/// by thread and then by generation order within the thread, so a fixed seed and thread count
/// reproduce the same output. The first error from any thread is returned; a panicking worker
/// re-raises its panic on the calling thread.
pub fn generate_batch<S: Shape>(
    generator: &NodeGenerator<S>,
    count: usize,
    config: &BatchConfig,
    seed: Option<u64>,
) -> GenResult<Vec<Node>> {
    let num_threads = config.num_threads.max(1).min(count.max(1));
    if !config.enabled || count < config.batch_size || num_threads == 1 {
        let mut rng = thread_rng_for(seed, 0);
        return try_fill_with(count, || generator.generate_with(&mut rng));
    }

    debug!(count, num_threads, "starting parallel batch");
    let per_thread = count / num_threads;
    let remaining = count % num_threads;

    let result = crossbeam::scope(|s| {
        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let thread_count = if thread_id < remaining {
                    per_thread + 1
                } else {
                    per_thread
                };
                s.spawn(move |_| {
                    let mut rng = thread_rng_for(seed, thread_id);
                    try_fill_with(thread_count, || generator.generate_with(&mut rng))
                })
            })
            .collect();

        let mut nodes = Vec::with_capacity(count);
        for handle in handles {
            match handle.join() {
                Ok(Ok(batch)) => nodes.extend(batch),
                Ok(Err(error)) => return Err(error),
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        Ok(nodes)
    });

    let nodes = result.unwrap_or_else(|payload| panic::resume_unwind(payload))?;
    debug!(generated = nodes.len(), "finished parallel batch");
    Ok(nodes)
}

fn thread_rng_for(seed: Option<u64>, thread_id: usize) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(SeededRngProvider::new(seed).worker_rng(thread_id)),
        None => Box::new(DefaultRngProvider.worker_rng(thread_id)),
    }
}
