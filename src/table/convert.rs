use serde::{Deserialize, Serialize};

use crate::error::{CleanError, TypeCoercionError};
use crate::table::schema::{resolve_columns, Column, ColumnIndex, REQUIRED_COLUMNS};
use crate::table::utils::{clean_str, parse_bool, parse_integer};
use crate::table::RawTable;

/// One player's appearance for one team in one match, with every required
/// column coerced to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Appearance {
    pub match_id: i64,
    pub match_name: String,
    pub team_id: i64,
    pub team_name: String,
    pub is_home: bool,
    pub player_id: i64,
    pub player_name: String,
    pub goals_scored: u32,
    pub minutes_played: u32,
}

/// Column-at-a-time coercion over a raw table.
struct Coercer<'a> {
    table: &'a RawTable,
    index: ColumnIndex,
}

impl<'a> Coercer<'a> {
    /// Coerce every cell of the `n`th required column with `parse`.
    fn column<T>(
        &self,
        n: usize,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<Vec<T>, TypeCoercionError> {
        let Column { name, ty } = REQUIRED_COLUMNS[n];
        let pos = self.index.0[n];

        self.table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let raw = row.get(pos).map(String::as_str).unwrap_or("");
                let cell = clean_str(raw);
                let parsed = if cell.is_empty() {
                    Err("missing value".to_string())
                } else {
                    parse(cell)
                };
                parsed.map_err(|reason| TypeCoercionError {
                    column: name.to_string(),
                    row: i + 1,
                    value: raw.to_string(),
                    expected: ty,
                    reason,
                })
            })
            .collect()
    }
}

fn integer(s: &str) -> Result<i64, String> {
    parse_integer(s)
}

fn count(s: &str) -> Result<u32, String> {
    let v = parse_integer(s)?;
    if v < 0 {
        return Err("must not be negative".into());
    }
    u32::try_from(v).map_err(|_| "out of range".into())
}

fn text(s: &str) -> Result<String, String> {
    Ok(s.to_string())
}

fn boolean(s: &str) -> Result<bool, String> {
    parse_bool(s).ok_or_else(|| "not a boolean".into())
}

/// Check the header and coerce every row into an `Appearance`.
///
/// Columns are enforced one at a time in schema order, so a table with
/// several bad columns always reports the earliest one.
pub fn coerce_rows(table: &RawTable) -> Result<Vec<Appearance>, CleanError> {
    let index = resolve_columns(&table.headers)?;
    let c = Coercer { table, index };

    let match_id = c.column(0, integer)?;
    let match_name = c.column(1, text)?;
    let team_id = c.column(2, integer)?;
    let team_name = c.column(3, text)?;
    let is_home = c.column(4, boolean)?;
    let player_id = c.column(5, integer)?;
    let player_name = c.column(6, text)?;
    let goals_scored = c.column(7, count)?;
    let minutes_played = c.column(8, count)?;

    let mut match_name = match_name.into_iter();
    let mut team_name = team_name.into_iter();
    let mut player_name = player_name.into_iter();

    Ok((0..table.rows.len())
        .map(|i| Appearance {
            match_id: match_id[i],
            match_name: match_name.next().unwrap_or_default(),
            team_id: team_id[i],
            team_name: team_name.next().unwrap_or_default(),
            is_home: is_home[i],
            player_id: player_id[i],
            player_name: player_name.next().unwrap_or_default(),
            goals_scored: goals_scored[i],
            minutes_played: minutes_played[i],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::schema::ColumnType;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            REQUIRED_COLUMNS.iter().map(|c| c.name.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn coerces_a_valid_row() {
        let t = table(&[&["1", " Match A ", "100", "\"Team X\"", "True", "7", "Alice", "2", "90.0"]]);
        let rows = coerce_rows(&t).unwrap();
        assert_eq!(
            rows,
            vec![Appearance {
                match_id: 1,
                match_name: "Match A".into(),
                team_id: 100,
                team_name: "Team X".into(),
                is_home: true,
                player_id: 7,
                player_name: "Alice".into(),
                goals_scored: 2,
                minutes_played: 90,
            }]
        );
    }

    #[test]
    fn bad_integer_names_column_and_row() {
        let t = table(&[
            &["1", "A", "100", "X", "true", "1", "Alice", "0", "90"],
            &["1", "A", "abc", "Y", "false", "2", "Bob", "0", "90"],
        ]);
        match coerce_rows(&t) {
            Err(CleanError::TypeCoercion(e)) => {
                assert_eq!(e.column, "team_id");
                assert_eq!(e.row, 2);
                assert_eq!(e.value, "abc");
                assert_eq!(e.expected, ColumnType::Integer);
            }
            other => panic!("expected type coercion error, got {:?}", other),
        }
    }

    #[test]
    fn earliest_column_is_reported_first() {
        // goals_scored is bad on row 1, match_id is bad on row 2
        let t = table(&[
            &["1", "A", "100", "X", "true", "1", "Alice", "x", "90"],
            &["?", "A", "200", "Y", "false", "2", "Bob", "0", "90"],
        ]);
        let err = coerce_rows(&t).unwrap_err();
        assert!(matches!(err, CleanError::TypeCoercion(ref e) if e.column == "match_id"));
    }

    #[test]
    fn negative_counts_are_rejected() {
        let t = table(&[&["1", "A", "100", "X", "true", "1", "Alice", "-1", "90"]]);
        let err = coerce_rows(&t).unwrap_err();
        assert!(matches!(err, CleanError::TypeCoercion(ref e) if e.column == "goals_scored"));
    }

    #[test]
    fn empty_match_id_is_a_missing_value() {
        let t = table(&[&["", "A", "100", "X", "true", "1", "Alice", "0", "90"]]);
        match coerce_rows(&t) {
            Err(CleanError::TypeCoercion(e)) => {
                assert_eq!(e.column, "match_id");
                assert_eq!(e.reason, "missing value");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bad_boolean() {
        let t = table(&[&["1", "A", "100", "X", "home", "1", "Alice", "0", "90"]]);
        let err = coerce_rows(&t).unwrap_err();
        assert!(matches!(err, CleanError::TypeCoercion(ref e) if e.expected == ColumnType::Boolean));
    }

    #[test]
    fn missing_column_is_schema_error() {
        let t = RawTable::new(vec!["match_id".into()], vec![]);
        assert!(matches!(coerce_rows(&t), Err(CleanError::Schema(_))));
    }
}
