// src/output/arrow.rs

use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array, Int64Array, StringArray, UInt32Array},
    datatypes::{DataType, Field, Schema, SchemaRef},
    record_batch::RecordBatch,
};
use once_cell::sync::Lazy;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::model::{Match, Player, Statistic, Team};

/// An output collection element.
/// - `COLLECTION` names the artifact (`<COLLECTION>.jsonl`, `.parquet`).
/// - `schema` / `to_arrays` describe the columnar form, in field order.
pub trait Record: Serialize + DeserializeOwned + Sized {
    const COLLECTION: &'static str;

    /// Arrow schema for this record type
    fn schema() -> SchemaRef;

    /// One array per schema field, one element per record
    fn to_arrays(records: &[Self]) -> Vec<ArrayRef>;

    fn to_batch(records: &[Self]) -> Result<RecordBatch> {
        RecordBatch::try_new(Self::schema(), Self::to_arrays(records)).map_err(Into::into)
    }
}

fn int64<T>(records: &[T], f: impl Fn(&T) -> i64) -> ArrayRef {
    Arc::new(Int64Array::from_iter_values(records.iter().map(f)))
}

fn uint32<T>(records: &[T], f: impl Fn(&T) -> u32) -> ArrayRef {
    Arc::new(UInt32Array::from_iter_values(records.iter().map(f)))
}

fn float64<T>(records: &[T], f: impl Fn(&T) -> f64) -> ArrayRef {
    Arc::new(Float64Array::from_iter_values(records.iter().map(f)))
}

fn utf8<T>(records: &[T], f: impl Fn(&T) -> &str) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(records.iter().map(f)))
}

static MATCH_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("match_id", DataType::Int64, false),
        Field::new("match_name", DataType::Utf8, false),
        Field::new("home_team_id", DataType::Int64, false),
        Field::new("away_team_id", DataType::Int64, false),
        Field::new("home_goals", DataType::Int64, false),
        Field::new("away_goals", DataType::Int64, false),
    ]))
});

static TEAM_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("team_id", DataType::Int64, false),
        Field::new("team_name", DataType::Utf8, false),
    ]))
});

static PLAYER_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("player_id", DataType::Int64, false),
        Field::new("player_name", DataType::Utf8, false),
        Field::new("team_id", DataType::Int64, false),
    ]))
});

static STATISTIC_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("stat_id", DataType::Int64, false),
        Field::new("player_id", DataType::Int64, false),
        Field::new("match_id", DataType::Int64, false),
        Field::new("goals_scored", DataType::UInt32, false),
        Field::new("minutes_played", DataType::UInt32, false),
        Field::new("fraction_of_total_minutes_played", DataType::Float64, false),
        Field::new("fraction_of_total_goals_scored", DataType::Float64, false),
    ]))
});

impl Record for Match {
    const COLLECTION: &'static str = "matches";

    fn schema() -> SchemaRef {
        MATCH_SCHEMA.clone()
    }

    fn to_arrays(records: &[Self]) -> Vec<ArrayRef> {
        vec![
            int64(records, |m| m.match_id),
            utf8(records, |m| m.match_name.as_str()),
            int64(records, |m| m.home_team_id),
            int64(records, |m| m.away_team_id),
            int64(records, |m| m.home_goals),
            int64(records, |m| m.away_goals),
        ]
    }
}

impl Record for Team {
    const COLLECTION: &'static str = "teams";

    fn schema() -> SchemaRef {
        TEAM_SCHEMA.clone()
    }

    fn to_arrays(records: &[Self]) -> Vec<ArrayRef> {
        vec![
            int64(records, |t| t.team_id),
            utf8(records, |t| t.team_name.as_str()),
        ]
    }
}

impl Record for Player {
    const COLLECTION: &'static str = "players";

    fn schema() -> SchemaRef {
        PLAYER_SCHEMA.clone()
    }

    fn to_arrays(records: &[Self]) -> Vec<ArrayRef> {
        vec![
            int64(records, |p| p.player_id),
            utf8(records, |p| p.player_name.as_str()),
            int64(records, |p| p.team_id),
        ]
    }
}

impl Record for Statistic {
    const COLLECTION: &'static str = "statistics";

    fn schema() -> SchemaRef {
        STATISTIC_SCHEMA.clone()
    }

    fn to_arrays(records: &[Self]) -> Vec<ArrayRef> {
        vec![
            int64(records, |s| s.stat_id),
            int64(records, |s| s.player_id),
            int64(records, |s| s.match_id),
            uint32(records, |s| s.goals_scored),
            uint32(records, |s| s.minutes_played),
            float64(records, |s| s.fraction_of_total_minutes_played),
            float64(records, |s| s.fraction_of_total_goals_scored),
        ]
    }
}
