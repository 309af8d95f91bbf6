use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clean::CleaningReport;
use crate::config::OutputFormat;
use crate::normalize::Normalized;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCounts {
    pub matches: usize,
    pub teams: usize,
    pub players: usize,
    pub statistics: usize,
}

impl From<&Normalized> for CollectionCounts {
    fn from(n: &Normalized) -> Self {
        Self {
            matches: n.matches.len(),
            teams: n.teams.len(),
            players: n.players.len(),
            statistics: n.statistics.len(),
        }
    }
}

/// Summary of one committed run, written next to the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub input: String,
    pub processing_start: DateTime<Utc>,
    pub processing_end: DateTime<Utc>,
    pub formats: Vec<OutputFormat>,
    pub cleaning: CleaningReport,
    pub counts: CollectionCounts,
}
