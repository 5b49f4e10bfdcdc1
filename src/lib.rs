//! Battle simulator and cheapest-winning-army search for Cosmos Quest style
//! lineup battles.

pub mod combat;
pub mod data;
pub mod optimizer;
pub mod parallel;
