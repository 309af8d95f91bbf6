use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::clean::CleanedTable;
use crate::config::ConflictPolicy;
use crate::error::EntityValidationError;
use crate::model::Player;

/// Team assignment of every player seen so far in one extraction.
///
/// The first team a player id is seen with is fixed; a later row with a
/// different team is a conflict. Scoped to a single call, never shared.
#[derive(Debug, Default)]
pub struct PlayerTeamRegistry {
    teams: HashMap<i64, i64>,
}

impl PlayerTeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `team_id` for `player_id`, or fail if the player already
    /// belongs to another team.
    pub fn assign(&mut self, player_id: i64, team_id: i64) -> Result<(), EntityValidationError> {
        match self.teams.get(&player_id) {
            Some(&assigned) if assigned != team_id => {
                Err(EntityValidationError::PlayerTeamConflict {
                    player_id,
                    assigned_team: assigned,
                    conflicting_team: team_id,
                })
            }
            Some(_) => Ok(()),
            None => {
                self.teams.insert(player_id, team_id);
                Ok(())
            }
        }
    }

    pub fn team_of(&self, player_id: i64) -> Option<i64> {
        self.teams.get(&player_id).copied()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// One `Player` per player id, in first-seen order.
///
/// Every row goes through a fresh `PlayerTeamRegistry`, so a player listed
/// for two teams anywhere in the table fails the extraction. Name conflicts
/// for the same player follow `policy`.
pub fn extract_players(
    table: &CleanedTable,
    policy: ConflictPolicy,
) -> Result<Vec<Player>, EntityValidationError> {
    let mut registry = PlayerTeamRegistry::new();
    let mut players: Vec<Player> = Vec::new();
    let mut slot: HashMap<i64, usize> = HashMap::new();
    let mut reported: HashSet<(i64, &str)> = HashSet::new();

    for row in table.rows() {
        registry.assign(row.player_id, row.team_id)?;

        match slot.get(&row.player_id) {
            None => {
                slot.insert(row.player_id, players.len());
                players.push(Player {
                    player_id: row.player_id,
                    player_name: row.player_name.clone(),
                    team_id: row.team_id,
                });
            }
            Some(&i) if players[i].player_name != row.player_name => match policy {
                ConflictPolicy::Reject => {
                    return Err(EntityValidationError::PlayerNameConflict {
                        player_id: row.player_id,
                        first: players[i].player_name.clone(),
                        other: row.player_name.clone(),
                    })
                }
                ConflictPolicy::FirstSeen => {
                    if reported.insert((row.player_id, row.player_name.as_str())) {
                        warn!(
                            player_id = row.player_id,
                            kept = %players[i].player_name,
                            ignored = %row.player_name,
                            "player name conflict, keeping first seen"
                        );
                    }
                }
            },
            Some(_) => {}
        }
    }
    Ok(players)
}
