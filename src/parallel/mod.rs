pub mod batch;
pub mod pool;

pub use batch::{batch_ranges, simulate_candidates};
pub use pool::{WorkerPool, WORKERS_ENV};
