// src/output/mod.rs

//! Staged, all-or-nothing writing of a run's artifacts.
//!
//! Everything is first written into a hidden staging directory inside the
//! output directory. Files are moved into place only once every one of them
//! has been written; on failure the staging directory is removed and the
//! output directory is left as it was.

use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;
use tracing::{debug, info, warn};

pub mod arrow;
pub mod jsonl;
pub mod manifest;
pub mod parquet;

pub use self::arrow::Record;
pub use jsonl::{read_jsonl, write_jsonl};
pub use manifest::{CollectionCounts, RunManifest, MANIFEST_FILE};
pub use self::parquet::write_parquet;

use crate::config::OutputFormat;
use crate::normalize::Normalized;

const STAGING_PREFIX: &str = ".matchnorm-staging-";

/// Artifact file name for a collection in a format, e.g. `matches.jsonl`.
pub fn artifact_name<T: Record>(format: OutputFormat) -> String {
    format!("{}.{}", T::COLLECTION, format.extension())
}

/// Files written into a staging directory, in commit order.
struct Staging {
    dir: TempDir,
    files: Vec<String>,
}

impl Staging {
    fn new(out_dir: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(out_dir)
            .with_context(|| format!("creating staging directory in {}", out_dir.display()))?;
        Ok(Self {
            dir,
            files: Vec::new(),
        })
    }

    fn stage<T: Record>(&mut self, format: OutputFormat, records: &[T]) -> Result<()> {
        let name = artifact_name::<T>(format);
        if self.files.contains(&name) {
            bail!("{} is already staged for this run", name);
        }
        let path = self.dir.path().join(&name);
        match format {
            OutputFormat::Jsonl => write_jsonl(&path, records)?,
            OutputFormat::Parquet => {
                write_parquet(&path, records)?;
            }
        }
        debug!(file = %name, records = records.len(), "staged");
        self.files.push(name);
        Ok(())
    }

    fn stage_manifest(&mut self, manifest: &RunManifest) -> Result<()> {
        let path = self.dir.path().join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(manifest).context("serializing manifest")?;
        fs::write(&path, json + "\n")
            .with_context(|| format!("writing {}", path.display()))?;
        self.files.push(MANIFEST_FILE.to_string());
        Ok(())
    }

    /// Move every staged file into `out_dir`, replacing earlier artifacts.
    /// If any move fails, the files already moved are taken out again and
    /// the replaced ones restored. The staging directory itself is removed
    /// when `self` drops.
    fn commit(self, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let previous = self.dir.path().join(".previous");
        fs::create_dir(&previous).context("creating backup directory")?;

        let mut done: Vec<(PathBuf, Option<PathBuf>)> = Vec::with_capacity(self.files.len());
        for name in &self.files {
            let from = self.dir.path().join(name);
            let to = out_dir.join(name);

            let saved = if to.is_file() {
                let backup = previous.join(name);
                if let Err(e) = fs::rename(&to, &backup) {
                    rollback(&done);
                    return Err(e).with_context(|| format!("moving aside {:?}", to));
                }
                Some(backup)
            } else {
                None
            };

            if let Err(e) = fs::rename(&from, &to) {
                if let Some(backup) = &saved {
                    if let Err(e) = fs::rename(backup, &to) {
                        warn!(path = %to.display(), error = %e, "rollback: could not restore file");
                    }
                }
                rollback(&done);
                return Err(e).with_context(|| format!("renaming {:?} -> {:?}", from, to));
            }
            done.push((to, saved));
        }

        Ok(done.into_iter().map(|(to, _)| to).collect())
    }
}

fn rollback(done: &[(PathBuf, Option<PathBuf>)]) {
    for (to, saved) in done.iter().rev() {
        if let Err(e) = fs::remove_file(to) {
            warn!(path = %to.display(), error = %e, "rollback: could not remove file");
        }
        if let Some(backup) = saved {
            if let Err(e) = fs::rename(backup, to) {
                warn!(path = %to.display(), error = %e, "rollback: could not restore file");
            }
        }
    }
}

/// Write all four collections (in every requested format) and the manifest
/// to `out_dir`. Returns the committed paths in write order: matches, teams,
/// players, statistics per format, then the manifest.
#[tracing::instrument(level = "info", skip(data, manifest), fields(out = %out_dir.display()))]
pub fn write_outputs(
    out_dir: &Path,
    formats: &[OutputFormat],
    data: &Normalized,
    manifest: &RunManifest,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut staging = Staging::new(out_dir)?;
    for &format in formats {
        staging.stage(format, &data.matches)?;
        staging.stage(format, &data.teams)?;
        staging.stage(format, &data.players)?;
        staging.stage(format, &data.statistics)?;
    }
    staging.stage_manifest(manifest)?;

    let committed = staging.commit(out_dir)?;
    info!(files = committed.len(), "outputs committed");
    Ok(committed)
}
