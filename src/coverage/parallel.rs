// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded worker pool for embarrassingly parallel, order-stable maps.
//!
//! Sentence analysis is a pure function of (sentence text, read-only index),
//! so it parallelizes trivially. Rayon's indexed `par_iter().map().collect()`
//! writes each result into its input slot, which gives corpus order back no
//! matter which worker finishes first. The pool is sized explicitly
//! (`workerCount`) rather than borrowing the global Rayon pool, so a run never
//! uses more threads than it was configured for.
//!
//! Small inputs skip the pool: spinning up threads for a few dozen sentences
//! costs more than it saves.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use tracing::warn;

use crate::config::OptimizerConfig;

/// Fixed-size pool that maps a slice while preserving order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    workers: usize,
    threshold: usize,
    enabled: bool,
}

impl WorkerPool {
    /// `threshold`: inputs of at most this many items run sequentially.
    pub fn new(workers: usize, threshold: usize, enabled: bool) -> Self {
        Self {
            workers: workers.max(1),
            threshold,
            enabled,
        }
    }

    /// A pool that always runs on the calling thread.
    pub fn sequential() -> Self {
        Self::new(1, usize::MAX, false)
    }

    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self::new(
            config.worker_count,
            config.parallel_threshold,
            config.parallel,
        )
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Whether an input of `len` items would be spread over workers.
    pub fn will_parallelize(&self, len: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && len > self.threshold
    }

    /// Apply `f` to every item, returning results in input order.
    ///
    /// `f` receives the item's position along with the item.
    pub fn map_ordered<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> R + Sync + Send,
    {
        if self.will_parallelize(items.len()) {
            #[cfg(feature = "parallel")]
            return self.map_parallel(items, f);
        }
        items.iter().enumerate().map(|(i, t)| f(i, t)).collect()
    }

    #[cfg(feature = "parallel")]
    fn map_parallel<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> R + Sync + Send,
    {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => pool.install(|| {
                items
                    .par_iter()
                    .enumerate()
                    .map(|(i, t)| f(i, t))
                    .collect()
            }),
            Err(e) => {
                warn!("worker pool unavailable ({}), running sequentially", e);
                items.iter().enumerate().map(|(i, t)| f(i, t)).collect()
            }
        }
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::from_config(&OptimizerConfig::default())
    }
}
