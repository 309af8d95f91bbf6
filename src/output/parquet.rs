use anyhow::{Context, Result};
use parquet::{
    arrow::ArrowWriter,
    basic::{BrotliLevel, Compression},
    file::properties::WriterProperties,
};
use std::{fs::File, path::Path};

use super::arrow::Record;

/// Write `records` as a single-row-group Parquet file. Returns bytes on disk.
pub fn write_parquet<T: Record>(path: &Path, records: &[T]) -> Result<u64> {
    let file =
        File::create(path).with_context(|| format!("creating file {}", path.display()))?;

    let props = WriterProperties::builder()
        .set_compression(Compression::BROTLI(BrotliLevel::try_new(5)?))
        .build();

    let mut writer = ArrowWriter::try_new(file, T::schema(), Some(props))
        .context("creating parquet writer")?;

    if !records.is_empty() {
        let batch = T::to_batch(records).context("building record batch")?;
        writer.write(&batch).context("writing batch to parquet")?;
    }
    writer.close().context("closing parquet writer")?;

    let metadata = std::fs::metadata(path).context("getting file metadata")?;
    Ok(metadata.len())
}
