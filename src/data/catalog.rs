//! Monster catalog: process-wide registry of monster/hero records and the quest table.
//!
//! Built once at startup from [GameData], then handed by reference to the
//! simulator and optimizer. Only hero derivation and pool filtering mutate it,
//! and both happen before any search starts.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::data::army::{Army, ArmyError, ArmyView, ARMY_MAX_SIZE};
use crate::data::loader::{GameData, HeroEntry, MonsterEntry};
use crate::data::monster::{split_leveled_name, Monster};
use crate::data::validate::{validate_game_data, ValidationSeverity};

/// Index of a record in the catalog. Stable for the lifetime of the catalog.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct MonsterId(pub u16);

impl MonsterId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown monster `{0}`")]
    UnknownMonster(String),
    #[error("unknown hero `{0}`")]
    UnknownHero(String),
    #[error("`{0}` is not a hero")]
    NotAHero(String),
    #[error("invalid hero level {0}")]
    InvalidLevel(u16),
    #[error("quest {quest} names unknown monster `{name}`")]
    UnknownQuestMonster { quest: usize, name: String },
    #[error("quest {quest} lists {len} monsters, more than {}", ARMY_MAX_SIZE)]
    QuestTooLong { quest: usize, len: usize },
    #[error("duplicate monster name `{0}`")]
    DuplicateName(String),
    #[error("monster roster is empty")]
    EmptyRoster,
    #[error("quest table is empty")]
    EmptyQuestTable,
    #[error("catalog cannot hold more than {} records", u16::MAX)]
    Full,
    #[error("invalid game data: {0}")]
    Invalid(String),
    #[error(transparent)]
    Army(#[from] ArmyError),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    monsters: Vec<Monster>,
    game_ids: Vec<i32>,
    by_name: HashMap<String, MonsterId>,
    by_game_id: HashMap<i32, MonsterId>,
    base_heroes: Vec<Monster>,
    base_hero_game_ids: Vec<i32>,
    base_hero_by_name: HashMap<String, usize>,
    base_hero_by_game_id: HashMap<i32, usize>,
    leveled: HashMap<(usize, u16), MonsterId>,
    quests: Vec<Army>,
    available_monsters: Vec<MonsterId>,
    available_heroes: Vec<MonsterId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from bootstrap data. Fails on anything the validator
    /// reports as an error, since no search can start from a broken table.
    pub fn bootstrap(data: &GameData) -> Result<Catalog, CatalogError> {
        if data.monsters.is_empty() {
            return Err(CatalogError::EmptyRoster);
        }
        if data.quests.is_empty() {
            return Err(CatalogError::EmptyQuestTable);
        }
        let report = validate_game_data(data);
        for diag in &report.diagnostics {
            if diag.severity == ValidationSeverity::Warning {
                warn!(context = %diag.context, "{}", diag.message);
            }
        }
        if report.has_errors() {
            return Err(CatalogError::Invalid(report.summary()));
        }

        let mut catalog = Catalog::new();
        for (position, entry) in data.monsters.iter().enumerate() {
            let game_id = entry.game_id.unwrap_or(-(position as i32 + 1));
            catalog.add_monster(monster_from_entry(entry), Some(game_id))?;
        }
        for (position, entry) in data.heroes.iter().enumerate() {
            let game_id = entry.game_id.unwrap_or(position as i32 + 1);
            catalog.add_base_hero(hero_from_entry(entry), Some(game_id))?;
        }
        for names in &data.quests {
            catalog.add_quest(names.as_slice())?;
        }

        info!(
            monsters = data.monsters.len(),
            heroes = data.heroes.len(),
            quests = catalog.quests.len(),
            "catalog bootstrapped"
        );
        Ok(catalog)
    }

    /// Register a plain monster record. `game_id` defaults to the in-game
    /// convention for plain monsters (`-(position + 1)`).
    pub fn add_monster(&mut self, monster: Monster, game_id: Option<i32>) -> Result<MonsterId, CatalogError> {
        let game_id = game_id.unwrap_or(-(self.plain_monster_count() as i32 + 1));
        self.insert(monster, game_id)
    }

    /// Register an unleveled hero. Base heroes are not fightable themselves;
    /// use [Catalog::add_leveled_hero] to obtain an id.
    pub fn add_base_hero(&mut self, hero: Monster, game_id: Option<i32>) -> Result<usize, CatalogError> {
        if !hero.is_hero() {
            return Err(CatalogError::NotAHero(hero.name));
        }
        if self.base_hero_by_name.contains_key(&hero.base_name) {
            return Err(CatalogError::DuplicateName(hero.base_name));
        }
        let position = self.base_heroes.len();
        let game_id = game_id.unwrap_or(position as i32 + 1);
        self.base_hero_by_name.insert(hero.base_name.clone(), position);
        self.base_hero_by_game_id.insert(game_id, position);
        self.base_heroes.push(hero);
        self.base_hero_game_ids.push(game_id);
        Ok(position)
    }

    /// Id of `base_name` at `level`, registering the derived record on first use.
    pub fn add_leveled_hero(&mut self, base_name: &str, level: u16) -> Result<MonsterId, CatalogError> {
        let position = *self
            .base_hero_by_name
            .get(base_name)
            .ok_or_else(|| CatalogError::UnknownHero(base_name.to_string()))?;
        if let Some(&id) = self.leveled.get(&(position, level)) {
            return Ok(id);
        }

        let derived = self.base_heroes[position].leveled(level)?;
        let id = self.insert(derived, self.base_hero_game_ids[position])?;
        self.leveled.insert((position, level), id);
        debug!(hero = base_name, level, id = id.0, "registered leveled hero");
        Ok(id)
    }

    /// Resolve a display name, deriving "Hero:level" records as needed.
    pub fn resolve_name(&mut self, name: &str) -> Result<MonsterId, CatalogError> {
        if let Some(id) = self.index_of(name) {
            return Ok(id);
        }
        match split_leveled_name(name) {
            (base, Some(level)) => self.add_leveled_hero(base, level),
            _ => Err(CatalogError::UnknownMonster(name.to_string())),
        }
    }

    /// Append a quest lineup given as display names, front first.
    pub fn add_quest<S: AsRef<str>>(&mut self, names: &[S]) -> Result<usize, CatalogError> {
        let quest = self.quests.len();
        if names.len() > ARMY_MAX_SIZE {
            return Err(CatalogError::QuestTooLong {
                quest,
                len: names.len(),
            });
        }
        let mut army = Army::new();
        for name in names {
            let name = name.as_ref();
            let id = self.resolve_name(name).map_err(|err| match err {
                CatalogError::UnknownMonster(_) | CatalogError::UnknownHero(_) => {
                    CatalogError::UnknownQuestMonster {
                        quest,
                        name: name.to_string(),
                    }
                }
                other => other,
            })?;
            army.push(self, id)?;
        }
        self.quests.push(army);
        Ok(quest)
    }

    fn insert(&mut self, monster: Monster, game_id: i32) -> Result<MonsterId, CatalogError> {
        if self.by_name.contains_key(&monster.name) {
            return Err(CatalogError::DuplicateName(monster.name));
        }
        let raw = u16::try_from(self.monsters.len()).map_err(|_| CatalogError::Full)?;
        let id = MonsterId(raw);
        self.by_name.insert(monster.name.clone(), id);
        if !monster.is_hero() {
            self.by_game_id.insert(game_id, id);
        }
        self.monsters.push(monster);
        self.game_ids.push(game_id);
        Ok(id)
    }

    fn plain_monster_count(&self) -> usize {
        self.monsters.iter().filter(|m| !m.is_hero()).count()
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<MonsterId> {
        self.by_name.get(name).copied()
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.get(id.index())
    }

    pub fn monsters(&self) -> impl Iterator<Item = (MonsterId, &Monster)> {
        self.monsters
            .iter()
            .enumerate()
            .map(|(index, monster)| (MonsterId(index as u16), monster))
    }

    pub fn base_hero(&self, name: &str) -> Option<&Monster> {
        self.base_hero_by_name
            .get(name)
            .map(|&position| &self.base_heroes[position])
    }

    /// In-game identifier of a record. Leveled heroes share their base hero's id.
    pub fn game_id(&self, id: MonsterId) -> Option<i32> {
        self.game_ids.get(id.index()).copied()
    }

    /// Reverse of [Catalog::game_id]. `level` is only consulted for heroes,
    /// which resolve only if that level was already registered.
    pub fn from_game_id(&self, game_id: i32, level: u16) -> Option<MonsterId> {
        if let Some(&id) = self.by_game_id.get(&game_id) {
            return Some(id);
        }
        let position = *self.base_hero_by_game_id.get(&game_id)?;
        self.leveled.get(&(position, level)).copied()
    }

    /// Fill the available monster pool with every plain monster costing at
    /// least `minimum_cost`, cheapest first.
    pub fn filter_available(&mut self, minimum_cost: i32) {
        let mut available: Vec<MonsterId> = self
            .monsters()
            .filter(|(_, monster)| !monster.is_hero() && monster.cost >= minimum_cost)
            .map(|(id, _)| id)
            .collect();
        available.sort_by_key(|&id| (self.monsters[id.index()].cost, id));
        debug!(minimum_cost, available = available.len(), "filtered monster pool");
        self.available_monsters = available;
    }

    /// Register the user's heroes (base name, level) as the available hero pool.
    pub fn set_available_heroes<S: AsRef<str>>(&mut self, heroes: &[(S, u16)]) -> Result<(), CatalogError> {
        let mut available = Vec::with_capacity(heroes.len());
        for (name, level) in heroes {
            let id = self.add_leveled_hero(name.as_ref(), *level)?;
            if !available.contains(&id) {
                available.push(id);
            }
        }
        self.available_heroes = available;
        Ok(())
    }

    pub fn available_monsters(&self) -> &[MonsterId] {
        &self.available_monsters
    }

    pub fn available_heroes(&self) -> &[MonsterId] {
        &self.available_heroes
    }

    /// Heroes followed by the filtered monsters; the pool the optimizer draws from.
    pub fn available_pool(&self) -> Vec<MonsterId> {
        self.available_heroes
            .iter()
            .chain(self.available_monsters.iter())
            .copied()
            .collect()
    }

    pub fn quests(&self) -> &[Army] {
        &self.quests
    }

    pub fn quest(&self, index: usize) -> Option<&Army> {
        self.quests.get(index)
    }

    pub fn quest_count(&self) -> usize {
        self.quests.len()
    }

    /// Index of the quest whose lineup equals `army` member for member.
    pub fn quest_index(&self, army: &Army) -> Option<usize> {
        self.quests.iter().position(|quest| quest == army)
    }

    /// Build an army from already registered display names.
    pub fn army_from_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Army, CatalogError> {
        let mut army = Army::new();
        for name in names {
            let name = name.as_ref();
            let id = self
                .index_of(name)
                .ok_or_else(|| CatalogError::UnknownMonster(name.to_string()))?;
            army.push(self, id)?;
        }
        Ok(army)
    }

    pub fn describe(&self, army: &Army) -> ArmyView {
        ArmyView {
            monsters: army
                .monsters()
                .iter()
                .filter_map(|&id| self.monster(id))
                .map(|monster| monster.name.clone())
                .collect(),
            cost: army.cost(),
        }
    }
}

fn monster_from_entry(entry: &MonsterEntry) -> Monster {
    Monster::normal(entry.hp, entry.damage, entry.cost, entry.name.clone(), entry.element)
}

fn hero_from_entry(entry: &HeroEntry) -> Monster {
    Monster::hero(
        entry.hp,
        entry.damage,
        entry.name.clone(),
        entry.element,
        entry.rarity,
        entry.ability,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::monster::{Ability, AbilityKind, Element, Rarity, Target};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_monster(Monster::normal(20, 8, 1000, "a1", Element::Air), None).unwrap();
        catalog.add_monster(Monster::normal(48, 6, 390, "e1", Element::Earth), None).unwrap();
        catalog.add_monster(Monster::normal(30, 3, 50, "w1", Element::Water), None).unwrap();
        catalog
            .add_base_hero(
                Monster::hero(
                    50,
                    12,
                    "Hunter",
                    Element::Fire,
                    Rarity::Rare,
                    Ability::new(AbilityKind::Buff, Target::All, Element::Fire, 2.0),
                ),
                None,
            )
            .unwrap();
        catalog
    }

    #[test]
    fn leveled_hero_registration_is_idempotent() {
        let mut catalog = catalog();
        let first = catalog.add_leveled_hero("Hunter", 10).unwrap();
        let len = catalog.len();
        let second = catalog.add_leveled_hero("Hunter", 10).unwrap();
        assert_eq!(first, second);
        assert_eq!(catalog.len(), len);
        assert_eq!(catalog.monster(first).unwrap().name, "Hunter:10");
        assert_eq!(catalog.index_of("Hunter:10"), Some(first));
    }

    #[test]
    fn leveled_hero_rejects_bad_input() {
        let mut catalog = catalog();
        assert!(matches!(
            catalog.add_leveled_hero("Hunter", 0),
            Err(CatalogError::InvalidLevel(0))
        ));
        assert!(matches!(
            catalog.add_leveled_hero("Nobody", 3),
            Err(CatalogError::UnknownHero(_))
        ));
        assert!(catalog.index_of("Hunter:0").is_none());
    }

    #[test]
    fn filter_available_applies_minimum_cost_and_sorts() {
        let mut catalog = catalog();
        catalog.add_leveled_hero("Hunter", 5).unwrap();
        catalog.filter_available(100);
        let names: Vec<&str> = catalog
            .available_monsters()
            .iter()
            .map(|&id| catalog.monster(id).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["e1", "a1"]);
    }

    #[test]
    fn game_ids_follow_roster_positions() {
        let mut catalog = catalog();
        let e1 = catalog.index_of("e1").unwrap();
        assert_eq!(catalog.game_id(e1), Some(-2));
        assert_eq!(catalog.from_game_id(-2, 0), Some(e1));

        assert_eq!(catalog.from_game_id(1, 7), None);
        let hunter = catalog.add_leveled_hero("Hunter", 7).unwrap();
        assert_eq!(catalog.game_id(hunter), Some(1));
        assert_eq!(catalog.from_game_id(1, 7), Some(hunter));
        assert_eq!(catalog.from_game_id(99, 1), None);
    }

    #[test]
    fn quest_with_leveled_hero_resolves() {
        let mut catalog = catalog();
        let quest = catalog.add_quest(&["w1", "Hunter:3"]).unwrap();
        let army = catalog.army_from_names(&["w1", "Hunter:3"]).unwrap();
        assert_eq!(catalog.quest_index(&army), Some(quest));
    }

    #[test]
    fn quest_with_unknown_name_is_rejected() {
        let mut catalog = catalog();
        assert!(matches!(
            catalog.add_quest(&["w1", "zz"]),
            Err(CatalogError::UnknownQuestMonster { quest: 0, .. })
        ));
        assert_eq!(catalog.quest_count(), 0);
    }
}
