use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Write `records` as newline-delimited JSON, one object per line.
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating file {}", path.display()))?;
    let mut w = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut w, record).context("serializing record")?;
        w.write_all(b"\n")?;
    }
    w.flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

/// Parse a newline-delimited JSON file back into records. Blank lines are
/// skipped.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .with_context(|| format!("parsing {} line {}", path.display(), idx + 1))?;
        out.push(record);
    }
    Ok(out)
}
