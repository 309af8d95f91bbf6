use std::collections::HashMap;
use tracing::warn;

use crate::clean::CleanedTable;
use crate::error::EntityValidationError;
use crate::model::{StatKey, Statistic};

/// Share of a regulation-length match the player was on the pitch.
/// Overtime appearances come out above 1.0 and are rejected by `Statistic`.
pub fn minutes_fraction(minutes_played: u32, regulation_minutes: u32) -> f64 {
    f64::from(minutes_played) / f64::from(regulation_minutes)
}

/// Share of the match's goals scored by the player.
pub fn goals_fraction(goals_scored: u32, match_total_goals: u64) -> f64 {
    match match_total_goals {
        // goalless match: nobody has a share
        0 => 0.0,
        total => f64::from(goals_scored) / total as f64,
    }
}

/// One `Statistic` per cleaned row, in table order.
pub fn extract_statistics(
    table: &CleanedTable,
    regulation_minutes: u32,
) -> Result<Vec<Statistic>, EntityValidationError> {
    let mut match_goals: HashMap<i64, u64> = HashMap::new();
    for row in table.rows() {
        *match_goals.entry(row.match_id).or_default() += u64::from(row.goals_scored);
    }

    let mut legacy_ids: HashMap<i64, StatKey> = HashMap::with_capacity(table.len());
    let mut stats = Vec::with_capacity(table.len());

    for row in table.rows() {
        let key = StatKey::new(row.match_id, row.player_id);
        let total = match_goals.get(&row.match_id).copied().unwrap_or(0);

        let stat = Statistic::new(
            key,
            row.goals_scored,
            row.minutes_played,
            minutes_fraction(row.minutes_played, regulation_minutes),
            goals_fraction(row.goals_scored, total),
        )?;

        if let Some(other) = legacy_ids.insert(stat.stat_id, key) {
            if other != key {
                warn!(
                    stat_id = stat.stat_id,
                    first = ?other,
                    second = ?key,
                    "stat_id collision between different match/player pairs"
                );
            }
        }
        stats.push(stat);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::tests::appearance;
    use crate::config::REGULATION_MINUTES;
    use crate::normalize::tests::two_match_table;

    #[test]
    fn one_statistic_per_row() {
        let stats = extract_statistics(&two_match_table(), REGULATION_MINUTES).unwrap();
        assert_eq!(stats.len(), 4);

        assert_eq!(
            stats[0],
            Statistic {
                stat_id: 11,
                player_id: 1,
                match_id: 1,
                goals_scored: 2,
                minutes_played: 90,
                fraction_of_total_minutes_played: 1.0,
                fraction_of_total_goals_scored: 2.0 / 3.0,
            }
        );
        assert_eq!(stats[1].stat_id, 12);
        assert_eq!(stats[1].fraction_of_total_minutes_played, 0.5);
        assert_eq!(stats[2].fraction_of_total_goals_scored, 0.0);
        assert_eq!(stats[3].fraction_of_total_goals_scored, 1.0);
    }

    #[test]
    fn goalless_match_has_zero_fractions() {
        let table = CleanedTable::from_appearances(vec![
            appearance(4, 10, true, 1, 0, 90),
            appearance(4, 20, false, 2, 0, 90),
            appearance(4, 20, false, 3, 0, 12),
        ]);
        let stats = extract_statistics(&table, REGULATION_MINUTES).unwrap();
        assert!(stats
            .iter()
            .all(|s| s.fraction_of_total_goals_scored == 0.0));
    }

    #[test]
    fn overtime_minutes_are_rejected() {
        let table = CleanedTable::from_appearances(vec![
            appearance(1, 10, true, 1, 0, 120),
            appearance(1, 20, false, 2, 0, 90),
        ]);
        assert!(matches!(
            extract_statistics(&table, REGULATION_MINUTES),
            Err(EntityValidationError::FractionOutOfRange { stat_id: 11, .. })
        ));
        // a longer regulation length accepts them
        assert!(extract_statistics(&table, 120).is_ok());
    }

    #[test]
    fn colliding_stat_ids_are_kept() {
        // (1, 23) and (12, 3) share stat_id 123
        let table = CleanedTable::from_appearances(vec![
            appearance(1, 10, true, 23, 0, 90),
            appearance(1, 20, false, 5, 0, 90),
            appearance(12, 10, true, 3, 0, 90),
            appearance(12, 20, false, 6, 0, 90),
        ]);
        let stats = extract_statistics(&table, REGULATION_MINUTES).unwrap();
        assert_eq!(stats[0].stat_id, 123);
        assert_eq!(stats[2].stat_id, 123);
        assert_ne!(stats[0].key(), stats[2].key());
    }

    #[test]
    fn fraction_helpers() {
        assert_eq!(minutes_fraction(45, 90), 0.5);
        assert_eq!(goals_fraction(0, 0), 0.0);
        assert_eq!(goals_fraction(1, 4), 0.25);
    }
}
