//! Fixed-capacity battle lineups.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use thiserror::Error;

use crate::combat::FightResult;
use crate::data::catalog::{Catalog, MonsterId};

/// Maximum number of monsters in one lineup.
pub const ARMY_MAX_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArmyError {
    #[error("army is full ({capacity} monsters)")]
    Full { capacity: usize },
    #[error("monster {0:?} is not in the catalog")]
    UnknownMonster(MonsterId),
}

/// Ordered lineup, front (index 0) to back.
///
/// The aggregate cost is maintained on every append. The attached fight
/// result is scratch state and takes no part in equality or hashing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Army {
    monsters: [MonsterId; ARMY_MAX_SIZE],
    len: u8,
    cost: i32,
    last_outcome: FightResult,
}

impl Army {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(catalog: &Catalog, ids: &[MonsterId]) -> Result<Self, ArmyError> {
        let mut army = Self::new();
        for &id in ids {
            army.push(catalog, id)?;
        }
        Ok(army)
    }

    /// Append `id` to the back of the lineup.
    pub fn push(&mut self, catalog: &Catalog, id: MonsterId) -> Result<(), ArmyError> {
        if self.is_full() {
            return Err(ArmyError::Full {
                capacity: ARMY_MAX_SIZE,
            });
        }
        let monster = catalog.monster(id).ok_or(ArmyError::UnknownMonster(id))?;
        self.monsters[self.len()] = id;
        self.cost += monster.cost;
        self.len += 1;
        Ok(())
    }

    /// Copy of this army with `id` appended and no fight result attached.
    pub fn extended(&self, catalog: &Catalog, id: MonsterId) -> Result<Self, ArmyError> {
        let mut next = Self {
            last_outcome: FightResult::default(),
            ..*self
        };
        next.push(catalog, id)?;
        Ok(next)
    }

    pub fn monsters(&self) -> &[MonsterId] {
        &self.monsters[..self.len()]
    }

    pub fn front(&self) -> Option<MonsterId> {
        self.monsters().first().copied()
    }

    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= ARMY_MAX_SIZE
    }

    /// Sum of the member costs.
    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn last_outcome(&self) -> &FightResult {
        &self.last_outcome
    }

    pub fn set_last_outcome(&mut self, outcome: FightResult) {
        self.last_outcome = outcome;
    }

    pub fn mark_dominated(&mut self) {
        self.last_outcome.dominated = true;
    }

    pub fn contains(&self, id: MonsterId) -> bool {
        self.monsters().contains(&id)
    }
}

impl PartialEq for Army {
    fn eq(&self, other: &Self) -> bool {
        self.monsters() == other.monsters()
    }
}

impl Eq for Army {}

impl Hash for Army {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.monsters().hash(state);
    }
}

/// Frontier order: non-dominated before dominated, then ascending cost.
pub fn has_fewer_followers(a: &Army, b: &Army) -> Ordering {
    a.last_outcome
        .dominated
        .cmp(&b.last_outcome.dominated)
        .then_with(|| a.cost.cmp(&b.cost))
}

/// Presentation view of an army: member display names and aggregate cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArmyView {
    pub monsters: Vec<String>,
    pub cost: i32,
}
