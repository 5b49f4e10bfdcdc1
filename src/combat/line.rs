//! Per-side battle state: a fixed array of fighters and a front pointer.

use crate::combat::outcome::SplashTotals;
use crate::data::{Ability, Army, Catalog, Element, ARMY_MAX_SIZE};

/// Live snapshot of one monster during a fight.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fighter {
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,
    pub element: Element,
    pub ability: Ability,
    pub is_hero: bool,
    /// Set once the death has been processed (revenge fired, front advanced).
    pub dead: bool,
}

impl Fighter {
    pub fn is_alive(&self) -> bool {
        !self.dead && self.hp > 0
    }

    pub fn take(&mut self, amount: i32) {
        self.hp -= amount.max(0);
    }
}

#[derive(Debug, Clone)]
pub struct Line {
    fighters: [Fighter; ARMY_MAX_SIZE],
    len: usize,
    front: usize,
    pub berserk_procs: u8,
    pub splash_taken: SplashTotals,
    /// Front was struck this turn.
    pub was_hit: bool,
}

impl Line {
    /// None when the army is empty or references an unknown id.
    pub fn from_army(catalog: &Catalog, army: &Army) -> Option<Line> {
        if army.is_empty() {
            return None;
        }
        let mut fighters = [Fighter::default(); ARMY_MAX_SIZE];
        for (slot, &id) in fighters.iter_mut().zip(army.monsters()) {
            let monster = catalog.monster(id)?;
            *slot = Fighter {
                hp: monster.hp,
                max_hp: monster.hp,
                damage: monster.damage,
                element: monster.element,
                ability: monster.ability,
                is_hero: monster.is_hero(),
                dead: false,
            };
        }
        Some(Line {
            fighters,
            len: army.len(),
            front: 0,
            berserk_procs: 0,
            splash_taken: SplashTotals::default(),
            was_hit: false,
        })
    }

    pub fn is_defeated(&self) -> bool {
        self.front >= self.len
    }

    pub fn front(&self) -> Option<&Fighter> {
        self.fighters[..self.len].get(self.front)
    }

    pub fn front_mut(&mut self) -> Option<&mut Fighter> {
        self.fighters[..self.len].get_mut(self.front)
    }

    /// Fighters from the front backwards, including pending deaths.
    pub fn active(&self) -> &[Fighter] {
        &self.fighters[self.front.min(self.len)..self.len]
    }

    pub fn active_mut(&mut self) -> &mut [Fighter] {
        let start = self.front.min(self.len);
        &mut self.fighters[start..self.len]
    }

    /// Living fighters behind the front.
    pub fn behind(&self) -> impl Iterator<Item = &Fighter> {
        self.active().iter().skip(1).filter(|f| f.is_alive())
    }

    pub fn lost(&self) -> usize {
        self.fighters[..self.len].iter().filter(|f| f.dead).count()
    }

    /// Mark fighters at or below 0 hp as dead and advance the front past them.
    /// Calls `on_death` once per newly dead fighter.
    pub fn collect_dead(&mut self, mut on_death: impl FnMut(&Fighter)) -> bool {
        let mut any = false;
        for fighter in self.active_mut() {
            if !fighter.dead && fighter.hp <= 0 {
                fighter.dead = true;
                on_death(fighter);
                any = true;
            }
        }
        let previous_front = self.front;
        while self.front < self.len && self.fighters[self.front].dead {
            self.front += 1;
        }
        if self.front != previous_front {
            self.berserk_procs = 0;
        }
        any
    }

    /// Apply the same damage to every living fighter.
    pub fn splash_all(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        let mut hit = false;
        for fighter in self.active_mut().iter_mut().filter(|f| f.is_alive()) {
            fighter.take(amount);
            hit = true;
        }
        if hit {
            self.splash_taken.aoe += amount;
        }
    }

    pub fn heal_all(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        for fighter in self.active_mut().iter_mut().filter(|f| f.is_alive()) {
            fighter.hp = (fighter.hp + amount).min(fighter.max_hp);
        }
    }
}
