//! Core types for Ausweg: scenarios, rooms, challenges, and the handler contract.
//!
//! This crate owns the immutable scenario data model and the [`ScenarioCatalog`]
//! that holds it. It also defines the [`ScenarioHandler`] contract every scenario
//! variant implements, so the engine can drive a session without knowing which
//! rules it is running.

/// Per-command response envelope and session status.
pub mod action;
/// Scenario catalog: the read-only registry of playable scenarios.
pub mod catalog;
/// Challenge definitions.
pub mod challenge;
/// Time source used by the engine and time-sensitive handlers.
pub mod clock;
/// Error types used throughout the crate.
pub mod error;
/// The scenario handler contract.
pub mod handler;
/// Splitting raw player input into a command and its arguments.
pub mod input;
/// Rooms, objects, and compass geometry.
pub mod room;
/// Scenario metadata and escape-room layouts.
pub mod scenario;

pub use action::{ActionResult, GameStatus, WinCheck};
pub use catalog::{Scenario, ScenarioCatalog};
pub use challenge::{Challenge, ChallengeType};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CatalogError, CatalogResult};
pub use handler::{HandlerFactory, ScenarioHandler};
pub use input::split_command;
pub use room::{Direction, GameObject, Position, Room};
pub use scenario::{Difficulty, EscapeRoomData, ScenarioInfo, ScenarioSummary, neighbor_index};
