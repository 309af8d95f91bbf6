use crate::clean::CleanedTable;
use crate::error::EntityValidationError;
use crate::model::Match;
use crate::normalize::group_by_match;
use crate::table::Appearance;

/// Distinct team ids on one side of a match, in first-seen order.
fn side_teams(rows: &[&Appearance], home: bool) -> Vec<i64> {
    let mut teams = Vec::new();
    for row in rows.iter().filter(|r| r.is_home == home) {
        if !teams.contains(&row.team_id) {
            teams.push(row.team_id);
        }
    }
    teams
}

/// One `Match` per match id.
///
/// The home side is the single team on rows with `is_home = true`, the away
/// side the single team on the other rows. Goals are summed per side and the
/// name comes from the first row of the match.
pub fn extract_matches(table: &CleanedTable) -> Result<Vec<Match>, EntityValidationError> {
    group_by_match(table.rows())
        .into_iter()
        .map(|(match_id, rows)| {
            let home = side_teams(&rows, true);
            let away = side_teams(&rows, false);

            if home.len() != 1 || away.len() != 1 || home[0] == away[0] {
                return Err(EntityValidationError::UnbalancedSides {
                    match_id,
                    home,
                    away,
                });
            }
            let (home_team_id, away_team_id) = (home[0], away[0]);

            let goals = |home_side: bool| -> i64 {
                rows.iter()
                    .filter(|r| r.is_home == home_side)
                    .map(|r| i64::from(r.goals_scored))
                    .sum()
            };

            Match::new(
                match_id,
                rows[0].match_name.clone(),
                home_team_id,
                away_team_id,
                goals(true),
                goals(false),
            )
        })
        .collect()
}
