use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use matchnorm::{pipeline, ConflictPolicy, OutputFormat, PipelineConfig};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Jsonl,
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Jsonl => OutputFormat::Jsonl,
            FormatArg::Parquet => OutputFormat::Parquet,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConflictArg {
    FirstSeen,
    Reject,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(c: ConflictArg) -> Self {
        match c {
            ConflictArg::FirstSeen => ConflictPolicy::FirstSeen,
            ConflictArg::Reject => ConflictPolicy::Reject,
        }
    }
}

/// Process football match data from CSV.
#[derive(Debug, Parser)]
#[command(name = "matchnorm", version)]
struct Cli {
    /// Path to the input CSV file
    file_path: PathBuf,

    /// Optional delimiter to split lines from CSV files
    #[arg(long = "csv-split", visible_alias = "csv_split")]
    csv_split: Option<char>,

    /// YAML config file; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the artifacts are committed to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Output format, repeatable
    #[arg(long = "format", value_enum)]
    formats: Vec<FormatArg>,

    /// Minutes in a full match, the denominator of the minutes fraction
    #[arg(long)]
    regulation_minutes: Option<u32>,

    /// How to resolve one id appearing under two names
    #[arg(long, value_enum)]
    name_conflicts: Option<ConflictArg>,
}

impl Cli {
    fn into_config(self) -> Result<(PathBuf, PipelineConfig)> {
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::from_yaml_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(d) = self.csv_split {
            cfg.delimiter = d;
        }
        if let Some(dir) = self.output_dir {
            cfg.output_dir = dir;
        }
        if !self.formats.is_empty() {
            cfg.formats.clear();
            for f in self.formats.into_iter().map(OutputFormat::from) {
                if !cfg.formats.contains(&f) {
                    cfg.formats.push(f);
                }
            }
        }
        if let Some(m) = self.regulation_minutes {
            cfg.normalize.regulation_minutes = m;
        }
        if let Some(c) = self.name_conflicts {
            cfg.normalize.name_conflicts = c.into();
        }
        cfg.validate().context("invalid options")?;
        Ok((self.file_path, cfg))
    }
}

fn main() {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,matchnorm=info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) options ──────────────────────────────────────────────────
    let cli = Cli::parse();
    let (input, cfg) = match cli.into_config() {
        Ok(v) => v,
        Err(e) => {
            error!("Error processing file: {:#}", e);
            std::process::exit(1);
        }
    };
    info!(?cfg, "configuration");

    // ─── 3) run ──────────────────────────────────────────────────────
    match pipeline::run(&input, &cfg) {
        Ok(manifest) => info!(
            matches = manifest.counts.matches,
            teams = manifest.counts.teams,
            players = manifest.counts.players,
            statistics = manifest.counts.statistics,
            out = %cfg.output_dir.display(),
            "done"
        ),
        Err(e) => {
            error!("Error processing file: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() -> Result<()> {
        let cli = Cli::try_parse_from([
            "matchnorm",
            "data.csv",
            "--csv_split",
            ";",
            "--format",
            "parquet",
            "--format",
            "jsonl",
            "--name-conflicts",
            "reject",
        ])?;
        let (input, cfg) = cli.into_config()?;
        assert_eq!(input, PathBuf::from("data.csv"));
        assert_eq!(cfg.delimiter, ';');
        assert_eq!(cfg.formats, vec![OutputFormat::Parquet, OutputFormat::Jsonl]);
        assert_eq!(cfg.normalize.name_conflicts, ConflictPolicy::Reject);
        assert_eq!(cfg.normalize.regulation_minutes, 90);
        Ok(())
    }

    #[test]
    fn repeated_format_flags_keep_first_order() -> Result<()> {
        let cli = Cli::try_parse_from([
            "matchnorm",
            "data.csv",
            "--format",
            "jsonl",
            "--format",
            "parquet",
            "--format",
            "jsonl",
        ])?;
        let (_, cfg) = cli.into_config()?;
        assert_eq!(cfg.formats, vec![OutputFormat::Jsonl, OutputFormat::Parquet]);
        Ok(())
    }

    #[test]
    fn input_path_is_required() {
        assert!(Cli::try_parse_from(["matchnorm"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
