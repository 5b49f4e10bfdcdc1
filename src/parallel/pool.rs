//! Rayon thread pool configuration for search workloads.
//!
//! A [WorkerPool] with a fixed worker count owns its rayon pool for its whole
//! lifetime, so every batch of a search runs on the same threads. With a
//! count of 0 work runs on Rayon's global pool (all CPU cores).

use std::env;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::warn;

/// Environment variable consulted when no explicit worker count is configured.
pub const WORKERS_ENV: &str = "COSMOS_WORKERS";

/// Configures how many worker threads simulate candidates in parallel.
#[derive(Debug, Default)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use Rayon default (num_cpus).
    pub workers: usize,
    pool: Option<ThreadPool>,
}

impl WorkerPool {
    /// Use exactly `n` worker threads. The threads are spawned here, once.
    pub fn with_workers(n: usize) -> Self {
        if n == 0 {
            return Self::default();
        }
        let pool = match ThreadPoolBuilder::new()
            .num_threads(n)
            .thread_name(|index| format!("cosmos-worker-{index}"))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!(workers = n, %err, "falling back to the global rayon pool");
                None
            }
        };
        Self { workers: n, pool }
    }

    /// `configured` when non-zero, else `COSMOS_WORKERS`, else the Rayon default.
    pub fn from_config(configured: usize) -> Self {
        if configured > 0 {
            return Self::with_workers(configured);
        }
        let from_env = env::var(WORKERS_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(0);
        Self::with_workers(from_env)
    }

    /// Run a closure on this pool, or on the global Rayon pool when no
    /// dedicated pool exists.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}
