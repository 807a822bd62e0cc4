//! Session engine for Ausweg.
//!
//! [`GameEngine`] owns the live sessions. It runs every command through the
//! same turn protocol: delegate to the scenario handler, count the turn, then
//! check the time limit before the win condition. Scoring happens once, when
//! a session is completed.

/// Engine configuration.
pub mod config;
/// The game engine.
pub mod engine;
/// Error types.
pub mod error;
/// Read-only views for renderers and reports.
pub mod report;
/// Final score calculation.
pub mod score;
/// Session records and the session store.
pub mod session;

pub use config::EngineConfig;
pub use engine::{GameEngine, NewGame};
pub use error::{EngineError, EngineResult};
pub use report::{GameStats, SessionSnapshot};
pub use score::final_score;
pub use session::{GameState, SessionId, SessionStore};
