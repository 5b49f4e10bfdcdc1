use tracing::debug;

use crate::data::{Army, Catalog, MonsterId, ARMY_MAX_SIZE};

/// Largest lineup length for which every surviving loser is extended.
pub const ARMY_MAX_BRUTEFORCEABLE_SIZE: usize = 4;
/// Losers extended per level once the lineup outgrows the exhaustive phase.
pub const DEFAULT_BEAM_WIDTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateStrategy {
    pub max_army_size: usize,
    pub bruteforce_size: usize,
    pub beam_width: usize,
    /// Whether a lineup may hold the same plain monster more than once.
    /// Heroes are unique and never repeat, at any level.
    pub allow_repeats: bool,
}

impl Default for CandidateStrategy {
    fn default() -> Self {
        Self {
            max_army_size: ARMY_MAX_SIZE,
            bruteforce_size: ARMY_MAX_BRUTEFORCEABLE_SIZE,
            beam_width: DEFAULT_BEAM_WIDTH,
            allow_repeats: true,
        }
    }
}

/// Grows lineups one slot at a time from a monster pool.
#[derive(Debug, Clone, Default)]
pub struct CandidateGenerator {
    strategy: CandidateStrategy,
}

impl CandidateGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: CandidateStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &CandidateStrategy {
        &self.strategy
    }

    /// Length cap, never above [ARMY_MAX_SIZE].
    pub fn max_army_size(&self) -> usize {
        self.strategy.max_army_size.min(ARMY_MAX_SIZE)
    }

    /// Lineups of length `len` are produced by extending every parent.
    pub fn is_exhaustive(&self, len: usize) -> bool {
        len <= self.strategy.bruteforce_size
    }

    /// One single-monster lineup per distinct pool entry, in pool order.
    pub fn seed_candidates(&self, catalog: &Catalog, pool: &[MonsterId]) -> Vec<Army> {
        if self.max_army_size() == 0 {
            return Vec::new();
        }
        distinct(pool)
            .into_iter()
            .filter_map(|id| Army::from_ids(catalog, &[id]).ok())
            .collect()
    }

    /// Narrow ranked parents (best first) to the ones worth extending into
    /// lineups of length `next_len`.
    pub fn select_parents(&self, mut ranked: Vec<Army>, next_len: usize) -> Vec<Army> {
        if next_len > self.max_army_size() {
            return Vec::new();
        }
        if !self.is_exhaustive(next_len) {
            ranked.truncate(self.strategy.beam_width);
        }
        ranked
    }

    /// Every parent extended by every pool monster at the back. Extensions
    /// costing `cost_ceiling` or more are skipped.
    pub fn extend(
        &self,
        catalog: &Catalog,
        parents: &[Army],
        pool: &[MonsterId],
        cost_ceiling: Option<i32>,
    ) -> Vec<Army> {
        let pool = distinct(pool);
        let mut candidates = Vec::with_capacity(parents.len() * pool.len());
        for parent in parents {
            if parent.len() >= self.max_army_size() {
                continue;
            }
            for &id in &pool {
                let Some(monster) = catalog.monster(id) else {
                    continue;
                };
                if monster.is_hero() {
                    if fields_hero(catalog, parent, &monster.base_name) {
                        continue;
                    }
                } else if !self.strategy.allow_repeats && parent.contains(id) {
                    continue;
                }
                let Ok(candidate) = parent.extended(catalog, id) else {
                    continue;
                };
                if cost_ceiling.is_some_and(|ceiling| candidate.cost() >= ceiling) {
                    continue;
                }
                candidates.push(candidate);
            }
        }
        debug!(
            parents = parents.len(),
            pool = pool.len(),
            candidates = candidates.len(),
            "extended lineups"
        );
        candidates
    }
}

/// True when `army` already holds a hero derived from `base_name`.
fn fields_hero(catalog: &Catalog, army: &Army, base_name: &str) -> bool {
    army.monsters()
        .iter()
        .filter_map(|&id| catalog.monster(id))
        .any(|member| member.is_hero() && member.base_name == base_name)
}

fn distinct(pool: &[MonsterId]) -> Vec<MonsterId> {
    let mut seen = Vec::with_capacity(pool.len());
    for &id in pool {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
