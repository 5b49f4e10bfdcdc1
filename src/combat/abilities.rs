//! One handler per ability kind. The simulator's phase loop asks every living
//! fighter's handler for its contribution to the current phase; kinds that do
//! not take part in a phase fall back to the neutral default.

use crate::data::{Ability, AbilityKind, Element, Target};

/// Share of a VALKYRIE hit kept by each following position.
pub const VALKYRIE_FALLOFF: f64 = 0.5;

/// All four element bits.
pub const RAINBOW_MASK: u8 = 0b1111;

/// Front-line facts a front monster's own ability may depend on.
#[derive(Debug, Clone, Copy)]
pub struct FrontContext {
    pub elapsed_turns: u16,
    /// Living plain (non-hero) monsters behind the front.
    pub plain_behind: u32,
    /// Element bits of the living monsters behind the front.
    pub elements_behind: u8,
    pub element: Element,
    pub opponent: Element,
    pub berserk_procs: u8,
}

/// How a front monster's attack lands on the opposing line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strike {
    /// Front target only.
    Single,
    /// Every living position, each taking `falloff` of the previous share.
    Spread { falloff: f64 },
    /// Front target, plus `fraction` of the hit to every living monster behind it.
    Pierce { fraction: f64 },
}

pub trait AbilityHandler: Sync {
    /// Flat damage the caster adds to its own side's front monster.
    fn buff(&self, _ability: &Ability, _front: Element, _caster_is_front: bool) -> f64 {
        0.0
    }

    /// Flat reduction the caster applies to damage taken by its side's front monster.
    fn protect(&self, _ability: &Ability, _front: Element, _caster_is_front: bool) -> f64 {
        0.0
    }

    /// Flat damage bonus the front monster grants itself.
    fn own_bonus(&self, _ability: &Ability, _ctx: &FrontContext) -> f64 {
        0.0
    }

    /// Damage multiplier the front monster applies to itself.
    fn own_multiplier(&self, _ability: &Ability, _ctx: &FrontContext) -> f64 {
        1.0
    }

    /// Damage dealt to every opposing monster each turn while the caster lives.
    fn splash(&self, _ability: &Ability) -> i32 {
        0
    }

    /// Hit points restored to every own monster each turn while the caster lives.
    fn heal(&self, _ability: &Ability) -> i32 {
        0
    }

    fn strike(&self, _ability: &Ability) -> Strike {
        Strike::Single
    }

    /// Hit points left after the front monster survived being attacked.
    fn after_surviving_hit(&self, _ability: &Ability, hp: i32) -> i32 {
        hp
    }

    /// Damage dealt to every opposing monster when the caster dies.
    fn on_death(&self, _ability: &Ability, _damage: i32) -> i32 {
        0
    }

    /// Whether each attack stacks another damage multiplier.
    fn stacks_on_attack(&self) -> bool {
        false
    }
}

fn in_range(target: Target, front: Element, caster_is_front: bool) -> bool {
    match target {
        Target::Itself => caster_is_front,
        other => other.covers(front),
    }
}

fn amount(ability: &Ability) -> f64 {
    f64::from(ability.amount)
}

fn flat(ability: &Ability) -> i32 {
    amount(ability).floor() as i32
}

struct Plain;
struct Buff;
struct Protect;
struct Champion;
struct Aoe;
struct PiercingAoe;
struct Heal;
struct Berserk;
struct Friends;
struct Adapt;
struct Rainbow;
struct Training;
struct Wither;
struct Revenge;
struct Valkyrie;

impl AbilityHandler for Plain {}

impl AbilityHandler for Buff {
    fn buff(&self, ability: &Ability, front: Element, caster_is_front: bool) -> f64 {
        if in_range(ability.target, front, caster_is_front) {
            amount(ability)
        } else {
            0.0
        }
    }
}

impl AbilityHandler for Protect {
    fn protect(&self, ability: &Ability, front: Element, caster_is_front: bool) -> f64 {
        if in_range(ability.target, front, caster_is_front) {
            amount(ability)
        } else {
            0.0
        }
    }
}

impl AbilityHandler for Champion {
    fn buff(&self, ability: &Ability, front: Element, caster_is_front: bool) -> f64 {
        Buff.buff(ability, front, caster_is_front)
    }

    fn protect(&self, ability: &Ability, front: Element, caster_is_front: bool) -> f64 {
        Protect.protect(ability, front, caster_is_front)
    }
}

impl AbilityHandler for Aoe {
    fn splash(&self, ability: &Ability) -> i32 {
        flat(ability)
    }
}

impl AbilityHandler for PiercingAoe {
    fn strike(&self, ability: &Ability) -> Strike {
        Strike::Pierce {
            fraction: amount(ability),
        }
    }
}

impl AbilityHandler for Heal {
    fn heal(&self, ability: &Ability) -> i32 {
        flat(ability)
    }
}

impl AbilityHandler for Berserk {
    fn own_multiplier(&self, ability: &Ability, ctx: &FrontContext) -> f64 {
        amount(ability).powi(i32::from(ctx.berserk_procs))
    }

    fn stacks_on_attack(&self) -> bool {
        true
    }
}

impl AbilityHandler for Friends {
    fn own_multiplier(&self, ability: &Ability, ctx: &FrontContext) -> f64 {
        amount(ability).powi(ctx.plain_behind as i32)
    }
}

impl AbilityHandler for Adapt {
    fn own_multiplier(&self, ability: &Ability, ctx: &FrontContext) -> f64 {
        if ctx.element.counters(ctx.opponent) {
            amount(ability)
        } else {
            1.0
        }
    }
}

impl AbilityHandler for Rainbow {
    fn own_bonus(&self, ability: &Ability, ctx: &FrontContext) -> f64 {
        if ctx.elements_behind & RAINBOW_MASK == RAINBOW_MASK {
            amount(ability)
        } else {
            0.0
        }
    }
}

impl AbilityHandler for Training {
    fn own_bonus(&self, ability: &Ability, ctx: &FrontContext) -> f64 {
        amount(ability) * f64::from(ctx.elapsed_turns)
    }
}

impl AbilityHandler for Wither {
    fn after_surviving_hit(&self, ability: &Ability, hp: i32) -> i32 {
        (f64::from(hp) * amount(ability)).floor() as i32
    }
}

impl AbilityHandler for Revenge {
    fn on_death(&self, ability: &Ability, damage: i32) -> i32 {
        (f64::from(damage) * amount(ability)).floor() as i32
    }
}

impl AbilityHandler for Valkyrie {
    fn strike(&self, _ability: &Ability) -> Strike {
        Strike::Spread {
            falloff: VALKYRIE_FALLOFF,
        }
    }
}

/// Handler for `kind`. `_L` kinds share the handler of their base kind; their
/// magnitude is already scaled by level in the catalog record.
pub fn handler(kind: AbilityKind) -> &'static dyn AbilityHandler {
    match kind {
        AbilityKind::Nothing => &Plain,
        AbilityKind::Buff | AbilityKind::BuffL => &Buff,
        AbilityKind::Protect | AbilityKind::ProtectL => &Protect,
        AbilityKind::Champion | AbilityKind::ChampionL => &Champion,
        AbilityKind::Aoe => &Aoe,
        AbilityKind::PAoe => &PiercingAoe,
        AbilityKind::Heal => &Heal,
        AbilityKind::Berserk => &Berserk,
        AbilityKind::Friends => &Friends,
        AbilityKind::Adapt => &Adapt,
        AbilityKind::Rainbow => &Rainbow,
        AbilityKind::Training => &Training,
        AbilityKind::Wither => &Wither,
        AbilityKind::Revenge => &Revenge,
        AbilityKind::Valkyrie => &Valkyrie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ability(kind: AbilityKind, target: Target, amount: f32) -> Ability {
        Ability::new(kind, target, Element::Fire, amount)
    }

    fn ctx() -> FrontContext {
        FrontContext {
            elapsed_turns: 3,
            plain_behind: 2,
            elements_behind: 0b0111,
            element: Element::Fire,
            opponent: Element::Earth,
            berserk_procs: 2,
        }
    }

    #[test]
    fn buff_respects_target_element() {
        let fire_buff = ability(AbilityKind::Buff, Target::Fire, 4.0);
        let h = handler(AbilityKind::Buff);
        assert_eq!(h.buff(&fire_buff, Element::Fire, false), 4.0);
        assert_eq!(h.buff(&fire_buff, Element::Water, false), 0.0);

        let self_buff = ability(AbilityKind::Buff, Target::Itself, 4.0);
        assert_eq!(h.buff(&self_buff, Element::Water, true), 4.0);
        assert_eq!(h.buff(&self_buff, Element::Water, false), 0.0);
    }

    #[test]
    fn champion_buffs_and_protects() {
        let champ = ability(AbilityKind::ChampionL, Target::All, 2.0);
        let h = handler(champ.kind);
        assert_eq!(h.buff(&champ, Element::Air, false), 2.0);
        assert_eq!(h.protect(&champ, Element::Air, false), 2.0);
    }

    #[test]
    fn multipliers_scale_with_context() {
        let c = ctx();
        let berserk = ability(AbilityKind::Berserk, Target::Itself, 2.0);
        assert_eq!(handler(berserk.kind).own_multiplier(&berserk, &c), 4.0);

        let friends = ability(AbilityKind::Friends, Target::Itself, 1.5);
        assert_eq!(handler(friends.kind).own_multiplier(&friends, &c), 2.25);

        let adapt = ability(AbilityKind::Adapt, Target::Itself, 2.0);
        assert_eq!(handler(adapt.kind).own_multiplier(&adapt, &c), 2.0);
    }

    #[test]
    fn rainbow_needs_all_four_elements() {
        let rainbow = ability(AbilityKind::Rainbow, Target::Itself, 10.0);
        let h = handler(rainbow.kind);
        assert_eq!(h.own_bonus(&rainbow, &ctx()), 0.0);
        let full = FrontContext {
            elements_behind: RAINBOW_MASK,
            ..ctx()
        };
        assert_eq!(h.own_bonus(&rainbow, &full), 10.0);
    }

    #[test]
    fn plain_monsters_are_neutral() {
        let h = handler(AbilityKind::Nothing);
        let none = Ability::NONE;
        assert_eq!(h.own_multiplier(&none, &ctx()), 1.0);
        assert_eq!(h.strike(&none), Strike::Single);
        assert_eq!(h.after_surviving_hit(&none, 17), 17);
        assert_eq!(h.on_death(&none, 40), 0);
    }
}
