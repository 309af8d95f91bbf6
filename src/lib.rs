//! Cleans a flat table of football player appearances and derives
//! normalized matches, teams, players and per-player statistics from it.

pub mod clean;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod table;

pub use clean::{clean, CleanedTable, CleaningReport};
pub use config::{ConflictPolicy, NormalizeOptions, OutputFormat, PipelineConfig};
pub use error::{
    CleanError, EntityValidationError, PipelineError, SchemaError, TypeCoercionError,
};
pub use model::{Match, Player, StatKey, Statistic, Team};
pub use normalize::{
    extract_matches, extract_players, extract_statistics, extract_teams, normalize, Normalized,
};
pub use pipeline::{process_table, run};
pub use table::{Appearance, RawTable};
