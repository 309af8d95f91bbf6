// src/pipeline.rs
use chrono::Utc;
use std::path::Path;
use tracing::info;

use crate::clean::{clean, CleanedTable};
use crate::config::{NormalizeOptions, PipelineConfig};
use crate::error::{PipelineError, Result};
use crate::normalize::{normalize, Normalized};
use crate::output::{write_outputs, CollectionCounts, RunManifest};
use crate::table::RawTable;

/// Clean and normalize an in-memory table. Nothing is written.
pub fn process_table(
    raw: &RawTable,
    opts: &NormalizeOptions,
) -> Result<(CleanedTable, Normalized)> {
    let cleaned = clean(raw)?;
    let data = normalize(&cleaned, opts)?;
    Ok((cleaned, data))
}

/// Load `input`, clean it, derive all collections and commit them to
/// `cfg.output_dir`. Either every artifact of the run is written or none is.
#[tracing::instrument(level = "info", skip(cfg), fields(input = %input.display()))]
pub fn run(input: &Path, cfg: &PipelineConfig) -> Result<RunManifest> {
    let processing_start = Utc::now();
    cfg.validate().map_err(PipelineError::Config)?;

    info!("Loading data from {}", input.display());
    let delimiter = cfg.delimiter_byte().map_err(PipelineError::Config)?;
    let raw = RawTable::from_path(input, delimiter).map_err(PipelineError::Load)?;

    let (cleaned, data) = process_table(&raw, &cfg.normalize)?;

    let manifest = RunManifest {
        input: input.display().to_string(),
        processing_start,
        processing_end: Utc::now(),
        formats: cfg.formats.clone(),
        cleaning: cleaned.report().clone(),
        counts: CollectionCounts::from(&data),
    };
    write_outputs(&cfg.output_dir, &cfg.formats, &data, &manifest)?;

    info!("Data processing completed successfully.");
    Ok(manifest)
}
