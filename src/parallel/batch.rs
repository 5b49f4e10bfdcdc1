//! Batch distribution for parallel simulation.
//!
//! Splits a level's candidates into batches so progress can be reported
//! between them. Each batch is simulated in parallel; batches run in order.

use rayon::prelude::*;

use crate::combat::{simulate_fight, SimulationConfig};
use crate::data::{Army, Catalog};
use crate::parallel::pool::WorkerPool;

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
///
/// # Example
/// ```
/// # use cosmos_solver::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Simulate every candidate against `quest` and attach the result to a copy
/// of it. Output order matches input order regardless of worker count.
pub fn simulate_candidates(
    catalog: &Catalog,
    quest: &Army,
    candidates: &[Army],
    config: &SimulationConfig,
    pool: &WorkerPool,
) -> Vec<Army> {
    pool.install(|| {
        candidates
            .par_iter()
            .map(|candidate| {
                let mut evaluated = *candidate;
                evaluated.set_last_outcome(simulate_fight(catalog, candidate, quest, config));
                evaluated
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_ranges_even_split() {
        let r = batch_ranges(100, 4);
        assert_eq!(r, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
    }

    #[test]
    fn batch_ranges_with_remainder() {
        let r = batch_ranges(10, 3);
        assert_eq!(r, vec![(0, 4), (4, 7), (7, 10)]);
    }

    #[test]
    fn batch_ranges_more_batches_than_items() {
        let r = batch_ranges(3, 10);
        assert_eq!(r.len(), 3);
        assert_eq!(r, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn batch_ranges_empty() {
        assert!(batch_ranges(0, 5).is_empty());
        assert!(batch_ranges(10, 0).is_empty());
    }
}
