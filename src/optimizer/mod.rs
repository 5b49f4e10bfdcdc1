pub mod candidate_generator;
pub mod export_csv;
pub mod frontier;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::SimulationConfig;
use crate::data::loader::read_structured;
use crate::data::{Army, Catalog, LoadError, MonsterId, ARMY_MAX_SIZE};
use crate::parallel::{batch_ranges, simulate_candidates, WorkerPool};

pub use candidate_generator::{
    CandidateGenerator, CandidateStrategy, ARMY_MAX_BRUTEFORCEABLE_SIZE, DEFAULT_BEAM_WIDTH,
};
pub use export_csv::{export_frontier_csv, write_frontier_csv};
pub use frontier::Frontier;

/// Number of progress-reporting batches per search level.
const SEARCH_PROGRESS_BATCH_COUNT: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_army_size: usize,
    /// Lineup length up to which every non-dominated loser is extended.
    pub bruteforce_size: usize,
    /// Losers extended per level past `bruteforce_size`.
    pub beam_width: usize,
    pub allow_repeats: bool,
    /// When false, dominated losers are extended too.
    pub prune_dominated: bool,
    /// Stop after simulating this many candidates. None means no limit.
    pub max_evaluations: Option<usize>,
    /// Worker threads; 0 defers to `COSMOS_WORKERS`, then all cores.
    pub workers: usize,
    pub simulation: SimulationConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_army_size: ARMY_MAX_SIZE,
            bruteforce_size: ARMY_MAX_BRUTEFORCEABLE_SIZE,
            beam_width: DEFAULT_BEAM_WIDTH,
            allow_repeats: true,
            prune_dominated: true,
            max_evaluations: None,
            workers: 0,
            simulation: SimulationConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Read a config from a JSON or YAML file; missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        read_structured(path.as_ref())
    }

    fn strategy(&self) -> CandidateStrategy {
        CandidateStrategy {
            max_army_size: self.max_army_size,
            bruteforce_size: self.bruteforce_size,
            beam_width: self.beam_width,
            allow_repeats: self.allow_repeats,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// At least one evaluated lineup beats the quest.
    Solved,
    /// Every lineup the strategy generates was evaluated without a win.
    Exhausted,
    /// `max_evaluations` cut off candidates before a win was found.
    BudgetReached,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Every evaluated lineup: non-dominated first, each group cheapest first.
    pub frontier: Vec<Army>,
    pub status: SearchStatus,
    pub evaluations: usize,
}

impl SearchReport {
    /// Cheapest winning lineup.
    pub fn solution(&self) -> Option<&Army> {
        self.frontier.iter().find(|army| army.last_outcome().left_won())
    }

    pub fn non_dominated(&self) -> impl Iterator<Item = &Army> {
        self.frontier
            .iter()
            .filter(|army| !army.last_outcome().dominated)
    }
}

/// Search for the cheapest lineup from `pool` that beats `quest`.
pub fn optimize_quest(
    catalog: &Catalog,
    quest: &Army,
    pool: &[MonsterId],
    config: &SearchConfig,
) -> SearchReport {
    optimize_with_progress(catalog, quest, pool, config, |_, _| {})
}

/// Like [optimize_quest] but invokes `on_progress(done, total)` between
/// simulation batches. `total` grows as each new level is generated.
pub fn optimize_with_progress<F>(
    catalog: &Catalog,
    quest: &Army,
    pool: &[MonsterId],
    config: &SearchConfig,
    on_progress: F,
) -> SearchReport
where
    F: FnMut(usize, usize),
{
    let workers = WorkerPool::from_config(config.workers);
    search(catalog, quest, pool, config, &workers, on_progress)
}

fn search<F>(
    catalog: &Catalog,
    quest: &Army,
    pool: &[MonsterId],
    config: &SearchConfig,
    workers: &WorkerPool,
    mut on_progress: F,
) -> SearchReport
where
    F: FnMut(usize, usize),
{
    let generator = CandidateGenerator::with_strategy(config.strategy());
    let mut budget_hit = false;
    let mut frontier = Frontier::new();
    let mut evaluations = 0usize;
    let mut scheduled = 0usize;

    let mut candidates = generator.seed_candidates(catalog, pool);
    let mut len = 1;
    loop {
        if let Some(best) = frontier.best_solution() {
            let ceiling = best.cost();
            candidates.retain(|army| army.cost() < ceiling);
        }
        if let Some(limit) = config.max_evaluations {
            let remaining = limit.saturating_sub(evaluations);
            if candidates.len() > remaining {
                budget_hit = true;
                candidates.truncate(remaining);
            }
        }
        if candidates.is_empty() {
            break;
        }

        let total = candidates.len();
        scheduled += total;
        on_progress(evaluations, scheduled);
        for (start, end) in batch_ranges(total, SEARCH_PROGRESS_BATCH_COUNT.min(total)) {
            let evaluated = simulate_candidates(
                catalog,
                quest,
                &candidates[start..end],
                &config.simulation,
                workers,
            );
            for army in evaluated {
                frontier.insert(army);
            }
            evaluations += end - start;
            on_progress(evaluations, scheduled);
        }
        debug!(
            len,
            candidates = total,
            evaluations,
            best_cost = frontier.best_solution().map(Army::cost),
            "search level evaluated"
        );

        let next_len = len + 1;
        let ranked = if config.prune_dominated {
            frontier.open_losers(len)
        } else {
            frontier.all_losers(len)
        };
        let parents = generator.select_parents(ranked, next_len);
        if parents.is_empty() {
            break;
        }
        let ceiling = frontier.best_solution().map(Army::cost);
        candidates = generator.extend(catalog, &parents, pool, ceiling);
        len = next_len;
    }

    let status = if frontier.best_solution().is_some() {
        SearchStatus::Solved
    } else if budget_hit {
        SearchStatus::BudgetReached
    } else {
        SearchStatus::Exhausted
    };
    let solution_cost = frontier.best_solution().map(Army::cost);
    info!(?status, evaluations, solution_cost, "search finished");
    SearchReport {
        frontier: frontier.into_sorted(),
        status,
        evaluations,
    }
}

/// Run [optimize_quest] for every registered quest against the catalog's
/// available pool, in quest order. All quests share one set of workers.
pub fn optimize_all_quests(catalog: &Catalog, config: &SearchConfig) -> Vec<SearchReport> {
    let pool = catalog.available_pool();
    let workers = WorkerPool::from_config(config.workers);
    catalog
        .quests()
        .iter()
        .enumerate()
        .map(|(index, quest)| {
            debug!(quest = index, "optimizing quest");
            search(catalog, quest, &pool, config, &workers, |_, _| {})
        })
        .collect()
}
