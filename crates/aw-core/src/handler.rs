//! The scenario handler contract.
//!
//! Each scenario variant supplies a [`HandlerFactory`] that builds a fresh
//! [`ScenarioHandler`] for every session. The engine only ever holds the
//! trait object, so adding a variant never touches the engine.

use std::sync::Arc;

use crate::action::{ActionResult, WinCheck};
use crate::clock::Clock;

/// Scenario-specific rules bound to one session.
pub trait ScenarioHandler: Send {
    /// Text shown once when the session starts.
    fn initial_message(&self) -> String;

    /// Scenario-specific command reference.
    fn help(&self) -> String;

    /// Apply one command. Malformed input is reported in the result, never
    /// as a panic or error. The returned turn count is overwritten by the engine.
    fn execute_command(&mut self, command: &str, args: &[String]) -> ActionResult;

    /// Whether the player has won. Must not mutate state.
    fn check_win_condition(&self) -> WinCheck;

    /// A serializable snapshot of handler-private state.
    fn state(&self) -> serde_json::Value;

    /// Bonus or penalty folded into the final score.
    fn score_adjustment(&self) -> i64;
}

/// Builds handlers for one scenario.
pub trait HandlerFactory: Send + Sync {
    /// Create a handler with its own private state.
    fn create_handler(&self, clock: Arc<dyn Clock>) -> Box<dyn ScenarioHandler>;
}
