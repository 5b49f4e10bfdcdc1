//! CSV export of a search frontier: one row per evaluated lineup, in the
//! order given.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::data::{Army, Catalog};

#[derive(Debug, Serialize)]
struct FrontierRow {
    rank: usize,
    lineup: String,
    size: usize,
    cost: i32,
    won: bool,
    dominated: bool,
    valid: bool,
    turns: u16,
    monsters_destroyed: u8,
    residual_damage: i32,
}

pub fn write_frontier_csv<W: Write>(
    catalog: &Catalog,
    armies: &[Army],
    writer: W,
) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    for (rank, army) in armies.iter().enumerate() {
        let outcome = army.last_outcome();
        out.serialize(FrontierRow {
            rank: rank + 1,
            lineup: catalog.describe(army).monsters.join(" | "),
            size: army.len(),
            cost: army.cost(),
            won: outcome.left_won(),
            dominated: outcome.dominated,
            valid: outcome.valid,
            turns: outcome.turn_count,
            monsters_destroyed: outcome.monsters_lost,
            residual_damage: outcome.damage,
        })?;
    }
    out.flush()?;
    Ok(())
}

pub fn export_frontier_csv(
    catalog: &Catalog,
    armies: &[Army],
    path: impl AsRef<Path>,
) -> Result<(), csv::Error> {
    let file = File::create(path.as_ref())?;
    write_frontier_csv(catalog, armies, file)
}
