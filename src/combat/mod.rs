pub mod abilities;
pub mod engine;
mod line;
pub mod outcome;

pub use abilities::{handler, AbilityHandler, FrontContext, Strike, VALKYRIE_FALLOFF};
pub use engine::{simulate_fight, SimulationConfig, DEFAULT_ELEMENT_BONUS, DEFAULT_MAX_TURNS};
pub use outcome::{is_not_worse_than, FightResult, Side, SplashTotals};
