use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Semantic type a required column is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Signed identifier.
    Integer,
    /// Non-negative counter (goals, minutes).
    Count,
    Text,
    Boolean,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnType::Integer => "integer",
            ColumnType::Count => "non-negative integer",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
        };
        f.write_str(s)
    }
}

/// A required column definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

const fn col(name: &'static str, ty: ColumnType) -> Column {
    Column { name, ty }
}

/// Fixed input schema, in enforcement order.
pub const REQUIRED_COLUMNS: [Column; 9] = [
    col("match_id", ColumnType::Integer),
    col("match_name", ColumnType::Text),
    col("team_id", ColumnType::Integer),
    col("team_name", ColumnType::Text),
    col("is_home", ColumnType::Boolean),
    col("player_id", ColumnType::Integer),
    col("player_name", ColumnType::Text),
    col("goals_scored", ColumnType::Count),
    col("minutes_played", ColumnType::Count),
];

/// Position of each required column inside the raw header, indexed like
/// `REQUIRED_COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex(pub [usize; REQUIRED_COLUMNS.len()]);

impl ColumnIndex {
    pub fn get(&self, name: &str) -> Option<usize> {
        REQUIRED_COLUMNS
            .iter()
            .position(|c| c.name == name)
            .map(|i| self.0[i])
    }
}

/// Resolve every required column against `headers`. All missing names are
/// reported at once, in schema order.
pub fn resolve_columns(headers: &[String]) -> Result<ColumnIndex, SchemaError> {
    let mut idx = [0usize; REQUIRED_COLUMNS.len()];
    let mut missing = Vec::new();

    for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS.iter()) {
        match headers.iter().position(|h| h == column.name) {
            Some(pos) => *slot = pos,
            None => missing.push(column.name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(ColumnIndex(idx))
    } else {
        Err(SchemaError { missing })
    }
}
