use thiserror::Error;

use crate::table::schema::ColumnType;

/// One or more required columns are absent from the input header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required columns: {missing:?}")]
pub struct SchemaError {
    pub missing: Vec<String>,
}

/// A cell could not be coerced to its column's declared type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Column '{column}' has incorrect data type at row {row}: {value:?} is not a valid {expected} ({reason})")]
pub struct TypeCoercionError {
    pub column: String,
    /// 1-based data row (the header is not counted).
    pub row: usize,
    pub value: String,
    pub expected: ColumnType,
    pub reason: String,
}

/// A derived entity violates one of its own invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityValidationError {
    #[error("Match {match_id}: goals cannot be negative (home {home_goals}, away {away_goals})")]
    NegativeGoals {
        match_id: i64,
        home_goals: i64,
        away_goals: i64,
    },

    #[error("Statistic {stat_id}: {field} must be between 0 and 1, got {value}")]
    FractionOutOfRange {
        stat_id: i64,
        field: &'static str,
        value: f64,
    },

    #[error("Player {player_id} is already assigned to team {assigned_team}, cannot also play for team {conflicting_team}")]
    PlayerTeamConflict {
        player_id: i64,
        assigned_team: i64,
        conflicting_team: i64,
    },

    #[error("Team {team_id} appears as both {first:?} and {other:?}")]
    TeamNameConflict {
        team_id: i64,
        first: String,
        other: String,
    },

    #[error("Player {player_id} appears as both {first:?} and {other:?}")]
    PlayerNameConflict {
        player_id: i64,
        first: String,
        other: String,
    },

    #[error("Match {match_id} does not split into one home team and one away team (home {home:?}, away {away:?})")]
    UnbalancedSides {
        match_id: i64,
        home: Vec<i64>,
        away: Vec<i64>,
    },

    #[error("Cannot build stat_id from match {match_id} and player {player_id}: {digits:?} is not a valid integer")]
    StatId {
        match_id: i64,
        player_id: i64,
        digits: String,
    },
}

/// Failures of the cleaning stage. Both abort the whole run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CleanError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    TypeCoercion(#[from] TypeCoercionError),
}

/// Anything that can stop a run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0:#}")]
    Config(anyhow::Error),

    #[error("Failed to load input table: {0:#}")]
    Load(anyhow::Error),

    #[error("Input table is invalid: {0}")]
    Clean(#[from] CleanError),

    #[error("Entity validation failed: {0}")]
    Entity(#[from] EntityValidationError),

    #[error("Failed to write outputs: {0:#}")]
    Output(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
