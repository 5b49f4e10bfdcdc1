//! Deterministic turn-based resolver for one army-vs-army encounter.
//!
//! Each turn runs the same phases in order: buff and protect recompute for
//! both fronts, the attack exchange (first mover, then the other side if its
//! front still stands), post-attack effects (splash, heal, wither), and death
//! processing with revenge bursts until no further monster falls.

use serde::{Deserialize, Serialize};

use crate::combat::abilities::{handler, FrontContext, Strike};
use crate::combat::line::Line;
use crate::combat::outcome::{FightResult, Side};
use crate::data::{Army, Catalog};

pub const DEFAULT_MAX_TURNS: u16 = 100;
/// Damage multiplier when the attacker's element counters the defender's.
pub const DEFAULT_ELEMENT_BONUS: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fights still running after this many turns are reported invalid.
    pub max_turns: u16,
    /// Side whose front attacks first every turn.
    pub first_mover: Side,
    pub element_bonus: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            first_mover: Side::Left,
            element_bonus: DEFAULT_ELEMENT_BONUS,
        }
    }
}

/// Resolve `left` against `right`. Neither army nor the catalog is modified;
/// attaching the result to an army is up to the caller.
pub fn simulate_fight(
    catalog: &Catalog,
    left: &Army,
    right: &Army,
    config: &SimulationConfig,
) -> FightResult {
    let (Some(left), Some(right)) = (
        Line::from_army(catalog, left),
        Line::from_army(catalog, right),
    ) else {
        return FightResult::default();
    };

    let mut battle = Battle { left, right };
    let mut turn: u16 = 0;
    while !battle.left.is_defeated() && !battle.right.is_defeated() {
        if turn >= config.max_turns {
            return FightResult {
                turn_count: turn,
                winner: Side::Right,
                left_splash: battle.left.splash_taken,
                right_splash: battle.right.splash_taken,
                valid: false,
                ..FightResult::default()
            };
        }
        battle.play_turn(turn, config);
        turn += 1;
    }
    battle.finish(turn)
}

struct Battle {
    left: Line,
    right: Line,
}

impl Battle {
    fn pair_mut(&mut self, side: Side) -> (&mut Line, &mut Line) {
        match side {
            Side::Left => (&mut self.left, &mut self.right),
            Side::Right => (&mut self.right, &mut self.left),
        }
    }

    fn play_turn(&mut self, elapsed: u16, config: &SimulationConfig) {
        let left_damage = planned_damage(&self.left, &self.right, elapsed, config);
        let right_damage = planned_damage(&self.right, &self.left, elapsed, config);
        let left_protect = protection(&self.left);
        let right_protect = protection(&self.right);
        self.left.was_hit = false;
        self.right.was_hit = false;

        for side in [config.first_mover, config.first_mover.other()] {
            let (damage, protect) = match side {
                Side::Left => (left_damage, right_protect),
                Side::Right => (right_damage, left_protect),
            };
            let (attacker, defender) = self.pair_mut(side);
            attack(attacker, defender, damage, protect);
        }

        let left_splash = total_splash(&self.left);
        let right_splash = total_splash(&self.right);
        self.right.splash_all(left_splash);
        self.left.splash_all(right_splash);

        let left_heal = total_heal(&self.left);
        let right_heal = total_heal(&self.right);
        self.left.heal_all(left_heal);
        self.right.heal_all(right_heal);

        wither(&mut self.left);
        wither(&mut self.right);

        self.resolve_deaths();
    }

    fn resolve_deaths(&mut self) {
        loop {
            let mut left_revenge = 0;
            let mut right_revenge = 0;
            let left_died = self.left.collect_dead(|f| {
                left_revenge += handler(f.ability.kind).on_death(&f.ability, f.damage);
            });
            let right_died = self.right.collect_dead(|f| {
                right_revenge += handler(f.ability.kind).on_death(&f.ability, f.damage);
            });
            if !left_died && !right_died {
                break;
            }
            self.right.splash_all(left_revenge);
            self.left.splash_all(right_revenge);
        }
    }

    fn finish(&self, turn: u16) -> FightResult {
        // Mutual annihilation counts against the left side.
        let (winner, line) = if self.right.is_defeated() && !self.left.is_defeated() {
            (Side::Left, &self.left)
        } else {
            (Side::Right, &self.right)
        };
        let front = line.front();
        FightResult {
            turn_count: turn,
            winner,
            monsters_lost: line.lost() as u8,
            left_splash: self.left.splash_taken,
            right_splash: self.right.splash_taken,
            berserk: front
                .filter(|f| handler(f.ability.kind).stacks_on_attack())
                .map_or(0, |_| line.berserk_procs),
            damage: front.map_or(0, |f| f.max_hp - f.hp),
            valid: true,
            dominated: false,
        }
    }
}

/// Damage the front of `own` would deal to the front of `opponent` this turn,
/// before the opponent's protection.
fn planned_damage(own: &Line, opponent: &Line, elapsed: u16, config: &SimulationConfig) -> f64 {
    let (Some(front), Some(target)) = (own.front(), opponent.front()) else {
        return 0.0;
    };

    let buffs: f64 = own
        .active()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_alive())
        .map(|(position, f)| handler(f.ability.kind).buff(&f.ability, front.element, position == 0))
        .sum();

    let ctx = FrontContext {
        elapsed_turns: elapsed,
        plain_behind: own.behind().filter(|f| !f.is_hero).count() as u32,
        elements_behind: own.behind().fold(0, |mask, f| mask | f.element.bit()),
        element: front.element,
        opponent: target.element,
        berserk_procs: own.berserk_procs,
    };
    let own_handler = handler(front.ability.kind);
    let mut damage = (f64::from(front.damage) + buffs + own_handler.own_bonus(&front.ability, &ctx))
        * own_handler.own_multiplier(&front.ability, &ctx);
    if front.element.counters(target.element) {
        damage *= config.element_bonus;
    }
    damage.max(0.0).floor()
}

/// Flat reduction applied to hits on the front of `line`.
fn protection(line: &Line) -> f64 {
    let Some(front) = line.front() else {
        return 0.0;
    };
    line.active()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_alive())
        .map(|(position, f)| handler(f.ability.kind).protect(&f.ability, front.element, position == 0))
        .sum()
}

fn attack(attacker: &mut Line, defender: &mut Line, damage: f64, protect: f64) {
    let Some(front) = attacker.front().copied().filter(|f| f.is_alive()) else {
        return;
    };
    if !defender.front().is_some_and(|f| f.is_alive()) {
        return;
    }
    let striker = handler(front.ability.kind);
    let direct = (damage - protect).max(0.0).floor() as i32;

    match striker.strike(&front.ability) {
        Strike::Single => {
            if let Some(target) = defender.front_mut() {
                target.take(direct);
            }
        }
        Strike::Spread { falloff } => {
            let mut share = damage;
            let mut spread = 0;
            for (position, target) in defender
                .active_mut()
                .iter_mut()
                .filter(|f| f.is_alive())
                .enumerate()
            {
                if position == 0 {
                    target.take(direct);
                } else {
                    let dealt = share.floor() as i32;
                    target.take(dealt);
                    spread += dealt;
                }
                share *= falloff;
            }
            defender.splash_taken.pierce += spread;
        }
        Strike::Pierce { fraction } => {
            let spill = (f64::from(direct) * fraction).floor() as i32;
            let mut spread = 0;
            for (position, target) in defender
                .active_mut()
                .iter_mut()
                .filter(|f| f.is_alive())
                .enumerate()
            {
                if position == 0 {
                    target.take(direct);
                } else if spill > 0 {
                    target.take(spill);
                    spread += spill;
                }
            }
            defender.splash_taken.pierce += spread;
        }
    }
    defender.was_hit = true;

    if striker.stacks_on_attack() {
        attacker.berserk_procs = attacker.berserk_procs.saturating_add(1);
    }
}

fn total_splash(line: &Line) -> i32 {
    line.active()
        .iter()
        .filter(|f| f.is_alive())
        .map(|f| handler(f.ability.kind).splash(&f.ability))
        .sum()
}

fn total_heal(line: &Line) -> i32 {
    line.active()
        .iter()
        .filter(|f| f.is_alive())
        .map(|f| handler(f.ability.kind).heal(&f.ability))
        .sum()
}

fn wither(line: &mut Line) {
    if !line.was_hit {
        return;
    }
    if let Some(front) = line.front_mut().filter(|f| f.is_alive()) {
        front.hp = handler(front.ability.kind).after_surviving_hit(&front.ability, front.hp);
    }
}
