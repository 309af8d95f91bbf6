use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::clean::CleanedTable;
use crate::config::ConflictPolicy;
use crate::error::EntityValidationError;
use crate::model::Team;

/// One `Team` per team id, in first-seen order.
///
/// A team id seen under a second name is resolved by `policy`: `FirstSeen`
/// keeps the earlier name, `Reject` fails.
pub fn extract_teams(
    table: &CleanedTable,
    policy: ConflictPolicy,
) -> Result<Vec<Team>, EntityValidationError> {
    let mut teams: Vec<Team> = Vec::new();
    let mut slot: HashMap<i64, usize> = HashMap::new();
    let mut reported: HashSet<(i64, &str)> = HashSet::new();

    for row in table.rows() {
        match slot.get(&row.team_id) {
            None => {
                slot.insert(row.team_id, teams.len());
                teams.push(Team {
                    team_id: row.team_id,
                    team_name: row.team_name.clone(),
                });
            }
            Some(&i) if teams[i].team_name != row.team_name => match policy {
                ConflictPolicy::Reject => {
                    return Err(EntityValidationError::TeamNameConflict {
                        team_id: row.team_id,
                        first: teams[i].team_name.clone(),
                        other: row.team_name.clone(),
                    })
                }
                ConflictPolicy::FirstSeen => {
                    if reported.insert((row.team_id, row.team_name.as_str())) {
                        warn!(
                            team_id = row.team_id,
                            kept = %teams[i].team_name,
                            ignored = %row.team_name,
                            "team name conflict, keeping first seen"
                        );
                    }
                }
            },
            Some(_) => {}
        }
    }
    Ok(teams)
}
