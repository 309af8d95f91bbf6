use anyhow::{bail, Context, Result};
use glob::glob;
use matchnorm::output::{read_jsonl, Record, MANIFEST_FILE};
use matchnorm::{Match, Player, Statistic, Team};
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::{env, fs::File, path::Path, process::exit};

fn main() {
    // Expect exactly one CLI argument: the output directory of a run.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <OUTPUT_DIR>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect_dir(Path::new(&args[1])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn inspect_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    println!("=== Output directory: {} ===", dir.display());

    let manifest = dir.join(MANIFEST_FILE);
    if manifest.exists() {
        let text = std::fs::read_to_string(&manifest)?;
        println!("{}", text.trim_end());
    } else {
        println!("(no {})", MANIFEST_FILE);
    }
    println!();

    for ext in ["jsonl", "parquet"] {
        let pattern = format!("{}/*.{}", dir.display(), ext);
        for entry in glob(&pattern)? {
            let path = entry?;
            match ext {
                "jsonl" => inspect_jsonl(&path)?,
                _ => inspect_parquet(&path)?,
            }
        }
    }
    Ok(())
}

/// Re-parse a JSONL artifact into its entity type and report the count.
fn inspect_jsonl(path: &Path) -> Result<()> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let count = match stem {
        s if s == Match::COLLECTION => read_jsonl::<Match>(path)?.len(),
        s if s == Team::COLLECTION => read_jsonl::<Team>(path)?.len(),
        s if s == Player::COLLECTION => read_jsonl::<Player>(path)?.len(),
        s if s == Statistic::COLLECTION => read_jsonl::<Statistic>(path)?.len(),
        _ => {
            println!("- {:<24} | skipped (unknown collection)", display_name(path));
            return Ok(());
        }
    };
    println!("- {:<24} | {} records, all parsed", display_name(path), count);
    Ok(())
}

/// Print row count and flat column list from Parquet metadata.
fn inspect_parquet(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = SerializedFileReader::new(file)?;
    let file_meta = reader.metadata().file_metadata();

    println!(
        "- {:<24} | {} rows in {} row groups",
        display_name(path),
        file_meta.num_rows(),
        reader.metadata().num_row_groups()
    );
    for col_desc in file_meta.schema_descr().columns() {
        println!(
            "    {:<34} {:?}",
            col_desc.name(),
            col_desc.physical_type()
        );
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
