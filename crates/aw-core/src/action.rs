//! Per-command response envelope and session status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a game session.
///
/// A session starts `InProgress` and leaves it exactly once; both other
/// states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// The session accepts commands.
    InProgress,
    /// The player reached the win condition.
    Completed,
    /// The scenario's time limit ran out.
    Failed,
}

impl GameStatus {
    /// Whether the session can no longer accept commands.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// The wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The response to a single in-game command.
///
/// A failed in-game command is still a successful call: `success` is false and
/// `message` says why. Handlers leave `turn_count` at zero; the engine stamps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the command had its intended effect.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Turn number after this command.
    pub turn_count: u32,
    /// Session status after this command, set by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_status: Option<GameStatus>,
}

impl ActionResult {
    /// A successful result.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            turn_count: 0,
            game_status: None,
        }
    }

    /// A failed (but recoverable) result.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            turn_count: 0,
            game_status: None,
        }
    }
}

/// Outcome of a win-condition poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinCheck {
    /// Whether the player has won.
    pub won: bool,
    /// Optional flavour text for the win.
    pub message: Option<String>,
}

impl WinCheck {
    /// The player has not won yet.
    pub fn pending() -> Self {
        Self::default()
    }

    /// The player has won.
    pub fn won(message: impl Into<String>) -> Self {
        Self {
            won: true,
            message: Some(message.into()),
        }
    }
}
