pub mod army;
pub mod catalog;
pub mod loader;
pub mod monster;
pub mod validate;

pub use army::{has_fewer_followers, Army, ArmyError, ArmyView, ARMY_MAX_SIZE};
pub use catalog::{Catalog, CatalogError, MonsterId};
pub use loader::{load_game_data, GameData, HeroEntry, LoadError, MonsterEntry};
pub use monster::{
    leveled_name, split_leveled_name, Ability, AbilityKind, Element, Monster, Rarity,
    Target, HEROLEVEL_SEPARATOR,
};
pub use validate::{validate_game_data, ValidationDiagnostic, ValidationReport, ValidationSeverity};
