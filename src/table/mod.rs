// src/table/mod.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::debug;

pub mod convert;
pub mod schema;
pub mod utils;

pub use convert::{coerce_rows, Appearance};
pub use schema::{resolve_columns, Column, ColumnIndex, ColumnType, REQUIRED_COLUMNS};

use utils::clean_str;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column names from the first record, trimmed and unquoted.
    pub headers: Vec<String>,
    /// Each data record, as a Vec of Strings (one per field).
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parse delimited text. The first record is the header; every record
    /// must have as many fields as the header.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> std::result::Result<Self, csv::Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| clean_str(h).to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(columns = headers.len(), rows = rows.len(), "parsed raw table");
        Ok(Self { headers, rows })
    }

    #[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open input file: {:?}", path.as_ref()))?;
        Self::from_reader(file, delimiter)
            .with_context(|| format!("CSV parse error in {:?}", path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_header_and_rows() -> Result<()> {
        let content = "match_id,\"match_name\", team_id\n1,Match A,100\n1,\"Match, A\",200\n";
        let table = RawTable::from_reader(content.as_bytes(), b',')?;
        assert_eq!(table.headers, vec!["match_id", "match_name", "team_id"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["1", "Match, A", "200"]);
        Ok(())
    }

    #[test]
    fn honours_custom_delimiter() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, "match_id;team_id\n7;100\n")?;
        let table = RawTable::from_path(tmp.path(), b';')?;
        assert_eq!(table.headers, vec!["match_id", "team_id"]);
        assert_eq!(table.rows, vec![vec!["7".to_string(), "100".to_string()]]);
        Ok(())
    }

    #[test]
    fn ragged_rows_are_a_load_error() {
        let content = "a,b\n1,2\n3\n";
        assert!(RawTable::from_reader(content.as_bytes(), b',').is_err());
    }

    #[test]
    fn header_only_is_empty() -> Result<()> {
        let table = RawTable::from_reader("a,b\n".as_bytes(), b',')?;
        assert!(table.is_empty());
        Ok(())
    }
}
