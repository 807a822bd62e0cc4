//! Scenario rules for Ausweg.
//!
//! Two handler variants live here: the room-graph [`EscapeRoomHandler`] and
//! the timing-based [`BellTimerHandler`]. Scenarios are described by JSON
//! definition files; [`builtin_catalog`] loads the ones shipped with the crate.

/// Scenarios embedded in the binary.
pub mod builtin;
/// Scenario definition files.
pub mod definition;
/// Room-graph escape-room rules.
pub mod escape;
/// Bell-timer mini-game rules.
pub mod timer;

pub use builtin::{builtin_catalog, builtin_scenarios};
pub use definition::{ScenarioDefinition, ScenarioRules, load_dir};
pub use escape::{EscapeRoomHandler, EscapeRoomScenario};
pub use timer::{BellTimerHandler, BellTimerScenario};
