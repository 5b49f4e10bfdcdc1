//! Monster and hero stat records: elements, rarities, ability descriptors and
//! leveled-hero derivation.

use serde::{Deserialize, Serialize};

use crate::data::catalog::CatalogError;

/// Separates a hero's base name from its level in display names ("Hero:10").
pub const HEROLEVEL_SEPARATOR: &str = ":";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    #[default]
    Earth,
    Air,
    Water,
    Fire,
}

impl Element {
    pub const ALL: [Element; 4] = [Self::Earth, Self::Air, Self::Water, Self::Fire];

    /// The element that has the advantage over `self`.
    pub const fn counter(self) -> Element {
        match self {
            Self::Earth => Self::Fire,
            Self::Air => Self::Earth,
            Self::Water => Self::Air,
            Self::Fire => Self::Water,
        }
    }

    /// True when `self` has the advantage over `other`.
    pub fn counters(self, other: Element) -> bool {
        other.counter() == self
    }

    pub(crate) const fn bit(self) -> u8 {
        match self {
            Self::Earth => 0b0001,
            Self::Air => 0b0010,
            Self::Water => 0b0100,
            Self::Fire => 0b1000,
        }
    }
}

/// Who a hero ability applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Earth,
    #[default]
    Air,
    Water,
    Fire,
    All,
    #[serde(rename = "self")]
    Itself,
}

impl Target {
    pub const fn element(self) -> Option<Element> {
        match self {
            Self::Earth => Some(Element::Earth),
            Self::Air => Some(Element::Air),
            Self::Water => Some(Element::Water),
            Self::Fire => Some(Element::Fire),
            Self::All | Self::Itself => None,
        }
    }

    /// Whether a monster of `element` is covered by this target.
    /// `Itself` is resolved by the caller, since it depends on position.
    pub fn covers(self, element: Element) -> bool {
        match self {
            Self::All => true,
            Self::Itself => false,
            other => other.element() == Some(element),
        }
    }
}

/// Hero rarity. The discriminant is the number of stat points gained per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    #[serde(rename = "none")]
    NoHero = 0,
    Common = 1,
    Rare = 2,
    Legendary = 6,
}

impl Rarity {
    pub const fn growth(self) -> i32 {
        self as i32
    }

    pub const fn is_hero(self) -> bool {
        !matches!(self, Self::NoHero)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbilityKind {
    /// Plain monsters.
    #[default]
    Nothing,
    Buff,
    BuffL,
    Protect,
    ProtectL,
    Aoe,
    PAoe,
    Heal,
    Berserk,
    Friends,
    Champion,
    ChampionL,
    Adapt,
    Rainbow,
    Training,
    Wither,
    Revenge,
    Valkyrie,
}

impl AbilityKind {
    /// `_L` kinds multiply their magnitude by the hero level.
    pub const fn scales_with_level(self) -> bool {
        matches!(self, Self::BuffL | Self::ProtectL | Self::ChampionL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ability {
    pub kind: AbilityKind,
    pub target: Target,
    pub source: Element,
    pub amount: f32,
}

impl Ability {
    /// Ability carried by plain monsters.
    pub const NONE: Ability = Ability {
        kind: AbilityKind::Nothing,
        target: Target::Air,
        source: Element::Air,
        amount: 1.0,
    };

    pub const fn new(kind: AbilityKind, target: Target, source: Element, amount: f32) -> Self {
        Self {
            kind,
            target,
            source,
            amount,
        }
    }

    /// Ability resolved for a hero of `level`; `_L` magnitudes are multiplied out.
    pub fn at_level(self, level: u16) -> Self {
        if self.kind.scales_with_level() {
            Self {
                amount: self.amount * f32::from(level),
                ..self
            }
        } else {
            self
        }
    }
}

impl Default for Ability {
    fn default() -> Self {
        Self::NONE
    }
}

/// Immutable stat record for a monster or a (possibly leveled) hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub hp: i32,
    pub damage: i32,
    pub cost: i32,
    /// Hero name without level suffix. Equal to `name` for plain monsters.
    pub base_name: String,
    pub element: Element,
    pub rarity: Rarity,
    pub ability: Ability,
    pub level: u16,
    pub name: String,
}

impl Monster {
    pub fn normal(hp: i32, damage: i32, cost: i32, name: impl Into<String>, element: Element) -> Self {
        let name = name.into();
        Self {
            hp,
            damage,
            cost,
            base_name: name.clone(),
            element,
            rarity: Rarity::NoHero,
            ability: Ability::NONE,
            level: 0,
            name,
        }
    }

    /// Unleveled base hero. Heroes carry no resource cost.
    pub fn hero(
        hp: i32,
        damage: i32,
        name: impl Into<String>,
        element: Element,
        rarity: Rarity,
        ability: Ability,
    ) -> Self {
        let name = name.into();
        Self {
            hp,
            damage,
            cost: 0,
            base_name: name.clone(),
            element,
            rarity,
            ability,
            level: 1,
            name,
        }
    }

    pub fn is_hero(&self) -> bool {
        self.rarity.is_hero()
    }

    /// Derive the record of this base hero at `level`.
    ///
    /// `growth × (level - 1)` stat points are split between hp and damage in
    /// proportion to the base values.
    pub fn leveled(&self, level: u16) -> Result<Monster, CatalogError> {
        if !self.is_hero() {
            return Err(CatalogError::NotAHero(self.base_name.clone()));
        }
        if level == 0 {
            return Err(CatalogError::InvalidLevel(level));
        }

        let points = f64::from(self.rarity.growth() * (i32::from(level) - 1));
        let total = f64::from(self.hp + self.damage).max(1.0);
        let hp_gain = (points * f64::from(self.hp) / total).round() as i32;
        let damage_gain = (points * f64::from(self.damage) / total).round() as i32;

        Ok(Monster {
            hp: self.hp + hp_gain,
            damage: self.damage + damage_gain,
            cost: self.cost,
            base_name: self.base_name.clone(),
            element: self.element,
            rarity: self.rarity,
            ability: self.ability.at_level(level),
            level,
            name: leveled_name(&self.base_name, level),
        })
    }
}

pub fn leveled_name(base_name: &str, level: u16) -> String {
    format!("{base_name}{HEROLEVEL_SEPARATOR}{level}")
}

/// Split "Hero:10" into ("Hero", Some(10)). Names without a valid suffix are returned whole.
pub fn split_leveled_name(name: &str) -> (&str, Option<u16>) {
    match name.rsplit_once(HEROLEVEL_SEPARATOR) {
        Some((base, level)) => match level.trim().parse::<u16>() {
            Ok(level) => (base.trim(), Some(level)),
            Err(_) => (name, None),
        },
        None => (name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hero(rarity: Rarity) -> Monster {
        Monster::hero(
            45,
            20,
            "Lady of Twilight",
            Element::Air,
            rarity,
            Ability::new(AbilityKind::ChampionL, Target::All, Element::Air, 0.1),
        )
    }

    #[test]
    fn counter_cycle_has_length_four() {
        for element in Element::ALL {
            let mut current = element;
            for _ in 0..4 {
                current = current.counter();
            }
            assert_eq!(current, element);
            assert_ne!(element.counter(), element);
        }
        assert!(Element::Fire.counters(Element::Earth));
        assert!(!Element::Earth.counters(Element::Fire));
    }

    #[test]
    fn leveled_hero_gains_growth_points_per_level() {
        let base = sample_hero(Rarity::Legendary);
        let leveled = base.leveled(11).unwrap();
        let gained = (leveled.hp - base.hp) + (leveled.damage - base.damage);
        assert_eq!(gained, 60);
        assert_eq!(leveled.name, "Lady of Twilight:11");
        assert_eq!(leveled.base_name, "Lady of Twilight");
        assert_eq!(leveled.cost, 0);
        assert!((leveled.ability.amount - 1.1).abs() < 1e-5);
    }

    #[test]
    fn level_one_keeps_base_stats() {
        let base = sample_hero(Rarity::Common);
        let leveled = base.leveled(1).unwrap();
        assert_eq!((leveled.hp, leveled.damage), (base.hp, base.damage));
    }

    #[test]
    fn derivation_rejects_level_zero_and_plain_monsters() {
        let base = sample_hero(Rarity::Rare);
        assert!(matches!(base.leveled(0), Err(CatalogError::InvalidLevel(0))));

        let plain = Monster::normal(10, 2, 5, "a1", Element::Air);
        assert!(matches!(plain.leveled(3), Err(CatalogError::NotAHero(_))));
    }

    #[test]
    fn split_leveled_name_parses_suffix() {
        assert_eq!(split_leveled_name("Hero:10"), ("Hero", Some(10)));
        assert_eq!(split_leveled_name("f3"), ("f3", None));
        assert_eq!(split_leveled_name("Odd:name"), ("Odd:name", None));
    }
}
