//! Scenario metadata and escape-room layouts.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::challenge::Challenge;
use crate::error::{CatalogError, CatalogResult};
use crate::room::{Direction, Position, Room};

/// How hard a scenario is meant to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Introductory.
    Easy,
    /// Standard.
    Medium,
    /// Demanding.
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        })
    }
}

/// Metadata shared by every scenario variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInfo {
    /// Unique id used to start games.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Intended difficulty.
    pub difficulty: Difficulty,
    /// Free-text pitch.
    pub description: String,
    /// Turn count of a perfect run; scoring penalises turns beyond it.
    pub optimal_turns: u32,
    /// Wall-clock limit for a session, in seconds.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

impl ScenarioInfo {
    /// The time limit as a duration, if the scenario has one.
    pub fn time_limit(&self) -> Option<chrono::Duration> {
        self.time_limit_secs
            .and_then(|secs| i64::try_from(secs).ok())
            .map(chrono::Duration::seconds)
    }

    /// The discovery view of this scenario.
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            difficulty: self.difficulty,
            description: self.description.clone(),
        }
    }
}

/// A scenario listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Scenario id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Intended difficulty.
    pub difficulty: Difficulty,
    /// Free-text pitch.
    pub description: String,
}

/// Room graph and challenge set of an escape-room scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscapeRoomData {
    /// Room the player starts in.
    pub starting_room: String,
    /// Room that wins the game, for documentation and map rendering.
    #[serde(default)]
    pub exit_room: Option<String>,
    /// All rooms in their initial state.
    pub rooms: Vec<Room>,
    /// All challenges.
    #[serde(default)]
    pub challenges: Vec<Challenge>,
}

impl EscapeRoomData {
    /// Look up a room by id.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Look up a challenge by id.
    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    /// Check the layout for internal consistency.
    pub fn validate(&self, scenario_id: &str) -> CatalogResult<()> {
        let invalid = |reason: String| CatalogError::invalid(scenario_id, reason);

        let mut ids = HashSet::new();
        let mut positions: HashSet<Position> = HashSet::new();
        for room in &self.rooms {
            if !ids.insert(room.id.as_str()) {
                return Err(invalid(format!("duplicate room id '{}'", room.id)));
            }
            if !positions.insert(room.position) {
                return Err(invalid(format!(
                    "room '{}' shares position ({}, {}) with another room",
                    room.id, room.position.x, room.position.y
                )));
            }
            if room.locked && room.unlock_requires.is_none() {
                return Err(invalid(format!(
                    "room '{}' is locked but has no unlock requirement",
                    room.id
                )));
            }
            if let Some(missing) = room
                .challenges
                .iter()
                .find(|c| self.challenge(c).is_none())
            {
                return Err(invalid(format!(
                    "room '{}' references unknown challenge '{missing}'",
                    room.id
                )));
            }
        }

        if !ids.contains(self.starting_room.as_str()) {
            return Err(invalid(format!(
                "starting room '{}' does not exist",
                self.starting_room
            )));
        }
        if let Some(exit) = &self.exit_room {
            if !ids.contains(exit.as_str()) {
                return Err(invalid(format!("exit room '{exit}' does not exist")));
            }
        }

        let mut challenge_ids = HashSet::new();
        for challenge in &self.challenges {
            if !challenge_ids.insert(challenge.id.as_str()) {
                return Err(invalid(format!("duplicate challenge id '{}'", challenge.id)));
            }
            if let Some(target) = &challenge.unlocks {
                if !ids.contains(target.as_str()) {
                    return Err(invalid(format!(
                        "challenge '{}' unlocks unknown room '{target}'",
                        challenge.id
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Index of the room reached from `from` by moving in `direction`.
///
/// The exit must be listed on `from` and a room must occupy the adjacent
/// grid cell; otherwise there is no way through.
pub fn neighbor_index(rooms: &[Room], from: &Room, direction: Direction) -> Option<usize> {
    if !from.has_exit(direction) {
        return None;
    }
    let target = from.position.step(direction);
    rooms.iter().position(|r| r.position == target)
}
