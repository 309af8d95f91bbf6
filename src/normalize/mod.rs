// src/normalize/mod.rs

//! Derives the four output collections from a cleaned table.
//!
//! Each extraction reads the same rows and is independent of the others.
//! Output order is the first-seen order of the grouping key, so results are
//! a deterministic function of the input row order.

use std::collections::HashMap;
use tracing::info;

use crate::clean::CleanedTable;
use crate::config::NormalizeOptions;
use crate::error::EntityValidationError;
use crate::model::{Match, Player, Statistic, Team};
use crate::table::Appearance;

pub mod matches;
pub mod players;
pub mod statistics;
pub mod teams;

pub use matches::extract_matches;
pub use players::{extract_players, PlayerTeamRegistry};
pub use statistics::{extract_statistics, goals_fraction, minutes_fraction};
pub use teams::extract_teams;

/// All four collections of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub matches: Vec<Match>,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub statistics: Vec<Statistic>,
}

/// Run every extraction. The first entity error aborts the whole batch.
#[tracing::instrument(level = "info", skip_all, fields(rows = table.len()))]
pub fn normalize(
    table: &CleanedTable,
    opts: &NormalizeOptions,
) -> Result<Normalized, EntityValidationError> {
    let out = Normalized {
        matches: extract_matches(table)?,
        teams: extract_teams(table, opts.name_conflicts)?,
        players: extract_players(table, opts.name_conflicts)?,
        statistics: extract_statistics(table, opts.regulation_minutes)?,
    };
    info!(
        matches = out.matches.len(),
        teams = out.teams.len(),
        players = out.players.len(),
        statistics = out.statistics.len(),
        "normalized"
    );
    Ok(out)
}

/// Group rows by match id, groups in first-seen order, rows in table order.
pub(crate) fn group_by_match(rows: &[Appearance]) -> Vec<(i64, Vec<&Appearance>)> {
    let mut slot: HashMap<i64, usize> = HashMap::new();
    let mut groups: Vec<(i64, Vec<&Appearance>)> = Vec::new();
    for row in rows {
        let i = *slot.entry(row.match_id).or_insert_with(|| {
            groups.push((row.match_id, Vec::new()));
            groups.len() - 1
        });
        groups[i].1.push(row);
    }
    groups
}
