// src/model.rs

//! Normalized entities derived from the cleaned appearance table.
//!
//! Every entity is built through a validating constructor; the public fields
//! are what gets serialized, one JSON object per record.

use serde::{Deserialize, Serialize};

use crate::error::EntityValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: i64,
    pub match_name: String,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_goals: i64,
    pub away_goals: i64,
}

impl Match {
    pub fn new(
        match_id: i64,
        match_name: String,
        home_team_id: i64,
        away_team_id: i64,
        home_goals: i64,
        away_goals: i64,
    ) -> Result<Self, EntityValidationError> {
        let m = Self {
            match_id,
            match_name,
            home_team_id,
            away_team_id,
            home_goals,
            away_goals,
        };
        m.validate()?;
        Ok(m)
    }

    pub fn validate(&self) -> Result<(), EntityValidationError> {
        if self.home_goals < 0 || self.away_goals < 0 {
            return Err(EntityValidationError::NegativeGoals {
                match_id: self.match_id,
                home_goals: self.home_goals,
                away_goals: self.away_goals,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
}

/// A player and the single team they play for. The one-team-per-player rule
/// spans the whole dataset, so it is enforced by the extraction that sees
/// every row (see `normalize::players`), not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: i64,
    pub player_name: String,
    pub team_id: i64,
}

/// Structured identity of a statistic: one player in one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatKey {
    pub match_id: i64,
    pub player_id: i64,
}

impl StatKey {
    pub fn new(match_id: i64, player_id: i64) -> Self {
        Self {
            match_id,
            player_id,
        }
    }

    /// Legacy numeric id: the decimal digits of `match_id` followed by those
    /// of `player_id`, read back as one integer (1, 2 -> 12).
    ///
    /// Not collision-free: (1, 23) and (12, 3) both give 123.
    pub fn legacy_id(&self) -> Result<i64, EntityValidationError> {
        let digits = format!("{}{}", self.match_id, self.player_id);
        digits
            .parse::<i64>()
            .map_err(|_| EntityValidationError::StatId {
                match_id: self.match_id,
                player_id: self.player_id,
                digits,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub stat_id: i64,
    pub player_id: i64,
    pub match_id: i64,
    pub goals_scored: u32,
    pub minutes_played: u32,
    pub fraction_of_total_minutes_played: f64,
    pub fraction_of_total_goals_scored: f64,
}

impl Statistic {
    pub fn new(
        key: StatKey,
        goals_scored: u32,
        minutes_played: u32,
        fraction_of_total_minutes_played: f64,
        fraction_of_total_goals_scored: f64,
    ) -> Result<Self, EntityValidationError> {
        let stat = Self {
            stat_id: key.legacy_id()?,
            player_id: key.player_id,
            match_id: key.match_id,
            goals_scored,
            minutes_played,
            fraction_of_total_minutes_played,
            fraction_of_total_goals_scored,
        };
        stat.validate()?;
        Ok(stat)
    }

    pub fn key(&self) -> StatKey {
        StatKey::new(self.match_id, self.player_id)
    }

    pub fn validate(&self) -> Result<(), EntityValidationError> {
        for (field, value) in [
            (
                "fraction_of_total_minutes_played",
                self.fraction_of_total_minutes_played,
            ),
            (
                "fraction_of_total_goals_scored",
                self.fraction_of_total_goals_scored,
            ),
        ] {
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&value) {
                return Err(EntityValidationError::FractionOutOfRange {
                    stat_id: self.stat_id,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_goals_are_rejected() {
        let err = Match::new(1, "A".into(), 100, 200, -1, 0).unwrap_err();
        assert!(matches!(
            err,
            EntityValidationError::NegativeGoals { match_id: 1, .. }
        ));
        assert!(Match::new(1, "A".into(), 100, 200, 0, 0).is_ok());
    }

    #[test]
    fn stat_id_concatenates_digits() {
        assert_eq!(StatKey::new(1, 2).legacy_id(), Ok(12));
        assert_eq!(StatKey::new(10, 305).legacy_id(), Ok(10305));
    }

    #[test]
    fn stat_id_collides_where_structured_key_does_not() {
        let a = StatKey::new(1, 23);
        let b = StatKey::new(12, 3);
        assert_eq!(a.legacy_id(), b.legacy_id());
        assert_ne!(a, b);
    }

    #[test]
    fn unbuildable_stat_ids() {
        assert!(matches!(
            StatKey::new(1, -2).legacy_id(),
            Err(EntityValidationError::StatId { .. })
        ));
        assert!(StatKey::new(i64::MAX, 1).legacy_id().is_err());
    }

    #[test]
    fn fractions_must_be_in_unit_range() {
        let key = StatKey::new(1, 2);
        assert!(Statistic::new(key, 1, 90, 1.0, 0.5).is_ok());
        let err = Statistic::new(key, 1, 120, 120.0 / 90.0, 0.5).unwrap_err();
        assert!(matches!(
            err,
            EntityValidationError::FractionOutOfRange {
                stat_id: 12,
                field: "fraction_of_total_minutes_played",
                ..
            }
        ));
        assert!(Statistic::new(key, 1, 90, 1.0, f64::NAN).is_err());
    }
}
