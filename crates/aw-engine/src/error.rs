//! Error types for the game engine.
//!
//! These are caller mistakes, not player mistakes. A rejected call never
//! consumes a turn or touches a session.

use aw_core::GameStatus;
use thiserror::Error;

use crate::session::SessionId;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by [`crate::GameEngine`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// No scenario with this id is registered.
    #[error("scenario {0} not found")]
    ScenarioNotFound(String),

    /// No live session with this id.
    #[error("game {0} not found")]
    SessionNotFound(SessionId),

    /// The session already finished.
    #[error("game {id} has already ended with status: {status}")]
    SessionEnded {
        /// The session.
        id: SessionId,
        /// Its terminal status.
        status: GameStatus,
    },

    /// Stats were requested before the session finished.
    #[error("game {0} is still in progress")]
    SessionInProgress(SessionId),
}
