//! Fight results and the dominance order used to prune the search frontier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    #[default]
    Right,
}

impl Side {
    pub const fn other(self) -> Side {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Splash damage one side absorbed over a fight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplashTotals {
    /// Whole-line splash (AOE ticks, REVENGE bursts) each monster of the line took.
    pub aoe: i32,
    /// Sum of line-piercing damage (VALKYRIE falloff, P_AOE spill) landed behind the front.
    pub pierce: i32,
}

/// Result of one simulated fight. `monsters_lost` and `damage` describe the
/// winning side; the losing side lost everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FightResult {
    pub turn_count: u16,
    pub winner: Side,
    pub monsters_lost: u8,
    pub left_splash: SplashTotals,
    pub right_splash: SplashTotals,
    /// Attacks stacked by the winning front monster if it is a berserker.
    pub berserk: u8,
    /// Damage taken by the winning side's current front monster.
    pub damage: i32,
    /// False for placeholders, empty lineups and fights stopped by the turn cap.
    pub valid: bool,
    /// Set by the optimizer only.
    pub dominated: bool,
}

impl FightResult {
    pub fn left_won(&self) -> bool {
        self.valid && self.winner == Side::Left
    }

    pub fn right_won(&self) -> bool {
        !self.left_won()
    }

    /// Dominance between two losing results of left-side candidates against
    /// the same quest. See [is_not_worse_than].
    pub fn is_not_worse_than(&self, other: &FightResult) -> bool {
        is_not_worse_than(self, other)
    }
}

/// `a` is at least as good as `b` for the left-side candidate.
///
/// Both splash components dealt to the quest side must be at least as large,
/// both components taken by the candidate side at most as large, and `a` must
/// rank no lower on (quest monsters destroyed, residual damage on the quest
/// front). Invalid results rank below every valid one.
///
/// Reflexive and transitive, and not total.
pub fn is_not_worse_than(a: &FightResult, b: &FightResult) -> bool {
    if !b.valid {
        return true;
    }
    if !a.valid {
        return false;
    }
    if a.right_splash.aoe < b.right_splash.aoe
        || a.right_splash.pierce < b.right_splash.pierce
        || a.left_splash.aoe > b.left_splash.aoe
        || a.left_splash.pierce > b.left_splash.pierce
    {
        return false;
    }
    if a.monsters_lost == b.monsters_lost {
        a.damage >= b.damage
    } else {
        a.monsters_lost > b.monsters_lost
    }
}
