//! Read-only views of a session.

use aw_core::GameStatus;
use serde::{Deserialize, Serialize};

use crate::session::{GameState, SessionId};

/// Full state of a session, for renderers and transports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The engine-owned record.
    pub game: GameState,
    /// Milliseconds since the session started, or its total once ended.
    pub elapsed_ms: i64,
    /// Handler-defined state.
    pub scenario_state: serde_json::Value,
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Session id.
    pub session_id: SessionId,
    /// Scenario played.
    pub scenario_id: String,
    /// Who played.
    pub agent_id: String,
    /// Terminal status.
    pub status: GameStatus,
    /// Turns taken.
    pub turn_count: u32,
    /// Milliseconds from start to end.
    pub time_spent_ms: i64,
    /// Final score; 0 for failed sessions.
    pub score: i64,
}

impl GameStats {
    /// Stats for an ended session.
    pub(crate) fn from_game(game: &GameState, time_spent_ms: i64) -> Self {
        Self {
            session_id: game.session_id,
            scenario_id: game.scenario_id.clone(),
            agent_id: game.agent_id.clone(),
            status: game.status,
            turn_count: game.turn_count,
            time_spent_ms,
            score: game.score,
        }
    }
}
