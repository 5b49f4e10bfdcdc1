//! Running set of evaluated armies with dominance bookkeeping.
//!
//! Dominance is only decided between losing armies of the same length. A
//! newcomer is dominated when a kept loser costing no more is not worse; if
//! it survives, every kept loser costing at least as much that it is not
//! worse than gets dominated instead. On exact ties the earlier entry stays.

use crate::data::{has_fewer_followers, Army, ARMY_MAX_SIZE};

#[derive(Debug, Clone, Default)]
pub struct Frontier {
    entries: Vec<Army>,
    /// Indices of non-dominated losers, grouped by army length.
    open: [Vec<usize>; ARMY_MAX_SIZE + 1],
    cheapest_win: Option<usize>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluated army. Returns false when it arrived dominated.
    pub fn insert(&mut self, mut army: Army) -> bool {
        let index = self.entries.len();
        let outcome = *army.last_outcome();

        if outcome.left_won() {
            let cheaper = self
                .cheapest_win
                .map_or(true, |best| army.cost() < self.entries[best].cost());
            if cheaper {
                self.cheapest_win = Some(index);
            }
            self.entries.push(army);
            return true;
        }

        let len = army.len().min(ARMY_MAX_SIZE);
        let dominated = self.open[len].iter().any(|&i| {
            let kept = &self.entries[i];
            kept.cost() <= army.cost() && kept.last_outcome().is_not_worse_than(&outcome)
        });
        if dominated {
            army.mark_dominated();
            self.entries.push(army);
            return false;
        }

        let entries = &mut self.entries;
        self.open[len].retain(|&i| {
            let kept = &mut entries[i];
            if kept.cost() >= army.cost() && outcome.is_not_worse_than(kept.last_outcome()) {
                kept.mark_dominated();
                false
            } else {
                true
            }
        });
        self.open[len].push(index);
        self.entries.push(army);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluated armies in insertion order.
    pub fn entries(&self) -> &[Army] {
        &self.entries
    }

    /// Cheapest winning army seen so far. Earliest wins a cost tie.
    pub fn best_solution(&self) -> Option<&Army> {
        self.cheapest_win.map(|i| &self.entries[i])
    }

    /// Non-dominated losers of length `len`, cheapest first.
    pub fn open_losers(&self, len: usize) -> Vec<Army> {
        let Some(open) = self.open.get(len) else {
            return Vec::new();
        };
        let mut losers: Vec<Army> = open.iter().map(|&i| self.entries[i]).collect();
        losers.sort_by(has_fewer_followers);
        losers
    }

    /// Every loser of length `len` regardless of dominance, cheapest first.
    pub fn all_losers(&self, len: usize) -> Vec<Army> {
        let mut losers: Vec<Army> = self
            .entries
            .iter()
            .filter(|army| army.len() == len && !army.last_outcome().left_won())
            .copied()
            .collect();
        losers.sort_by(has_fewer_followers);
        losers
    }

    /// Non-dominated entries first, each group in ascending cost. Stable, so
    /// equal-cost entries keep evaluation order.
    pub fn into_sorted(self) -> Vec<Army> {
        let mut entries = self.entries;
        entries.sort_by(has_fewer_followers);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{FightResult, Side};
    use crate::data::{Catalog, Element, Monster, MonsterId};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for (name, cost) in [("cheap", 10), ("mid", 50), ("pricey", 200)] {
            catalog
                .add_monster(Monster::normal(10, 1, cost, name, Element::Air), None)
                .unwrap();
        }
        catalog
    }

    fn army(catalog: &Catalog, ids: &[u16], outcome: FightResult) -> Army {
        let ids: Vec<MonsterId> = ids.iter().map(|&i| MonsterId(i)).collect();
        let mut army = Army::from_ids(catalog, &ids).unwrap();
        army.set_last_outcome(outcome);
        army
    }

    fn loss(destroyed: u8, damage: i32) -> FightResult {
        FightResult {
            turn_count: 3,
            winner: Side::Right,
            monsters_lost: destroyed,
            damage,
            valid: true,
            ..FightResult::default()
        }
    }

    fn win() -> FightResult {
        FightResult {
            turn_count: 3,
            winner: Side::Left,
            valid: true,
            ..FightResult::default()
        }
    }

    #[test]
    fn expensive_loser_not_better_is_dominated() {
        let catalog = catalog();
        let mut frontier = Frontier::new();
        assert!(frontier.insert(army(&catalog, &[0], loss(1, 20))));
        assert!(!frontier.insert(army(&catalog, &[2], loss(1, 10))));
        assert_eq!(frontier.open_losers(1).len(), 1);
        assert!(frontier.entries()[1].last_outcome().dominated);
    }

    #[test]
    fn cheaper_better_newcomer_dominates_kept_entry() {
        let catalog = catalog();
        let mut frontier = Frontier::new();
        frontier.insert(army(&catalog, &[2], loss(0, 5)));
        assert!(frontier.insert(army(&catalog, &[1], loss(1, 0))));
        assert!(frontier.entries()[0].last_outcome().dominated);
        let open = frontier.open_losers(1);
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].cost(), 50);
    }

    #[test]
    fn better_but_pricier_loser_stays_open() {
        let catalog = catalog();
        let mut frontier = Frontier::new();
        frontier.insert(army(&catalog, &[0], loss(0, 5)));
        assert!(frontier.insert(army(&catalog, &[2], loss(2, 0))));
        assert_eq!(frontier.open_losers(1).len(), 2);
    }

    #[test]
    fn different_lengths_never_compare() {
        let catalog = catalog();
        let mut frontier = Frontier::new();
        frontier.insert(army(&catalog, &[0], loss(3, 50)));
        assert!(frontier.insert(army(&catalog, &[0, 0], loss(0, 0))));
        assert_eq!(frontier.open_losers(2).len(), 1);
    }

    #[test]
    fn sorted_output_puts_open_entries_first_by_cost() {
        let catalog = catalog();
        let mut frontier = Frontier::new();
        frontier.insert(army(&catalog, &[1], loss(0, 5)));
        frontier.insert(army(&catalog, &[2], loss(0, 1)));
        frontier.insert(army(&catalog, &[2, 2], win()));
        frontier.insert(army(&catalog, &[0], loss(0, 5)));

        assert_eq!(frontier.best_solution().map(Army::cost), Some(400));
        let sorted = frontier.into_sorted();
        let costs: Vec<i32> = sorted.iter().map(Army::cost).collect();
        assert_eq!(costs, vec![10, 400, 50, 200]);
        assert!(sorted[2].last_outcome().dominated);
    }
}
