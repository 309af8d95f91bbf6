// src/clean.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{info, warn};

use crate::error::CleanError;
use crate::table::{coerce_rows, Appearance, RawTable};

/// Rows removed by each cleaning rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    /// Match ids dropped because they did not have exactly two teams.
    pub unbalanced_matches: Vec<i64>,
    pub unbalanced_rows_removed: usize,
    pub duplicate_rows_removed: usize,
    pub output_rows: usize,
}

/// Appearance rows that passed schema, type and structural checks.
///
/// Invariants: every match id has exactly two distinct team ids, and every
/// (match_id, team_id, player_id) triple occurs once. Rows keep input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedTable {
    rows: Vec<Appearance>,
    report: CleaningReport,
}

impl CleanedTable {
    pub fn rows(&self) -> &[Appearance] {
        &self.rows
    }

    pub fn report(&self) -> &CleaningReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply the structural rules to already-typed rows.
    pub fn from_appearances(rows: Vec<Appearance>) -> Self {
        let input_rows = rows.len();

        let (rows, unbalanced_matches, unbalanced_rows_removed) = drop_unbalanced_matches(rows);
        if !unbalanced_matches.is_empty() {
            warn!(
                matches = unbalanced_matches.len(),
                rows = unbalanced_rows_removed,
                "Removing matches without exactly 2 teams"
            );
        }
        info!("Matches validated.");

        let (rows, duplicate_rows_removed) = drop_duplicate_appearances(rows);
        if duplicate_rows_removed > 0 {
            warn!(
                rows = duplicate_rows_removed,
                "Removing duplicate player entries"
            );
        }

        let report = CleaningReport {
            input_rows,
            unbalanced_matches,
            unbalanced_rows_removed,
            duplicate_rows_removed,
            output_rows: rows.len(),
        };
        Self { rows, report }
    }
}

/// Validate `table` against the fixed schema and remove structurally
/// invalid rows.
///
/// 1. every required column must be present;
/// 2. every cell must coerce to its column type;
/// 3. matches without exactly two distinct teams lose all their rows;
/// 4. repeated (match, team, player) rows keep only the first occurrence.
///
/// Steps 1 and 2 fail the whole table. Steps 3 and 4 only drop rows.
#[tracing::instrument(level = "info", skip(table), fields(rows = table.rows.len()))]
pub fn clean(table: &RawTable) -> Result<CleanedTable, CleanError> {
    let rows = coerce_rows(table)?;
    info!("Data types validated.");

    let cleaned = CleanedTable::from_appearances(rows);
    let report = cleaned.report();
    info!(
        kept = report.output_rows,
        removed = report.input_rows - report.output_rows,
        "Data cleaning completed."
    );
    Ok(cleaned)
}

fn drop_unbalanced_matches(rows: Vec<Appearance>) -> (Vec<Appearance>, Vec<i64>, usize) {
    let mut teams: HashMap<i64, HashSet<i64>> = HashMap::new();
    for row in &rows {
        teams.entry(row.match_id).or_default().insert(row.team_id);
    }

    let invalid: BTreeSet<i64> = teams
        .into_iter()
        .filter(|(_, t)| t.len() != 2)
        .map(|(m, _)| m)
        .collect();
    if invalid.is_empty() {
        return (rows, Vec::new(), 0);
    }

    let before = rows.len();
    let kept: Vec<Appearance> = rows
        .into_iter()
        .filter(|r| !invalid.contains(&r.match_id))
        .collect();
    let removed = before - kept.len();
    (kept, invalid.into_iter().collect(), removed)
}

fn drop_duplicate_appearances(rows: Vec<Appearance>) -> (Vec<Appearance>, usize) {
    let before = rows.len();
    let mut seen: HashSet<(i64, i64, i64)> = HashSet::with_capacity(before);
    let kept: Vec<Appearance> = rows
        .into_iter()
        .filter(|r| seen.insert((r.match_id, r.team_id, r.player_id)))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}
