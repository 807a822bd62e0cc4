//! Configuration for the game engine.

use serde::{Deserialize, Serialize};

/// Scoring constants and session lifetime.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
///
/// ```toml
/// turn_penalty = 10
/// idle_timeout_secs = 600
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Score every session starts from.
    pub seed_score: i64,
    /// Points lost per turn beyond the scenario's optimal turn count.
    pub turn_penalty: i64,
    /// Seconds a perfect player is expected to spend per optimal turn.
    pub seconds_per_optimal_turn: u64,
    /// Seconds beyond the expected time that cost one point.
    pub seconds_per_time_penalty_point: u64,
    /// Sessions idle longer than this are reclaimed by a sweep.
    pub idle_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed_score: 1000,
            turn_penalty: 5,
            seconds_per_optimal_turn: 10,
            seconds_per_time_penalty_point: 10,
            idle_timeout_secs: 30 * 60,
        }
    }
}

impl EngineConfig {
    /// Set the seed score.
    pub fn with_seed_score(mut self, score: i64) -> Self {
        self.seed_score = score;
        self
    }

    /// Set the per-turn penalty.
    pub fn with_turn_penalty(mut self, penalty: i64) -> Self {
        self.turn_penalty = penalty;
        self
    }

    /// Set the expected seconds per optimal turn.
    pub fn with_seconds_per_optimal_turn(mut self, secs: u64) -> Self {
        self.seconds_per_optimal_turn = secs;
        self
    }

    /// Set the seconds that cost one point (at least 1).
    pub fn with_seconds_per_time_penalty_point(mut self, secs: u64) -> Self {
        self.seconds_per_time_penalty_point = secs.max(1);
        self
    }

    /// Set the idle timeout.
    pub fn with_idle_timeout_secs(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    /// The idle timeout as a duration.
    pub fn idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.idle_timeout_secs).unwrap_or(i64::MAX))
    }
}
