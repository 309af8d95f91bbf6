use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Regulation match length used as the minutes-played denominator.
pub const REGULATION_MINUTES: u32 = 90;

/// What to do when one id shows up with two different names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Keep the name seen first in table order and log a warning.
    #[default]
    FirstSeen,
    /// Fail the run.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Jsonl,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Parquet => "parquet",
        }
    }
}

/// Knobs for the normalization stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub regulation_minutes: u32,
    pub name_conflicts: ConflictPolicy,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            regulation_minutes: REGULATION_MINUTES,
            name_conflicts: ConflictPolicy::FirstSeen,
        }
    }
}

/// Configuration for one pipeline run. Every field has a default, so a YAML
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Single-byte field delimiter of the input file.
    pub delimiter: char,
    pub output_dir: PathBuf,
    pub formats: Vec<OutputFormat>,
    #[serde(flatten)]
    pub normalize: NormalizeOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            output_dir: PathBuf::from("output"),
            formats: vec![OutputFormat::Jsonl],
            normalize: NormalizeOptions::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        if self.formats.is_empty() {
            bail!("at least one output format is required");
        }
        for (i, f) in self.formats.iter().enumerate() {
            if self.formats[..i].contains(f) {
                bail!("output format {:?} is listed more than once", f.extension());
            }
        }
        if self.normalize.regulation_minutes == 0 {
            bail!("regulation_minutes must be positive");
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter {:?} is not a single-byte character", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }
}
