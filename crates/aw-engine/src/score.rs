//! Final score calculation.

use crate::config::EngineConfig;

/// Score of a completed session.
///
/// Starts at the seed score, loses points for turns beyond `optimal_turns`
/// and for every full penalty period spent beyond the expected time
/// (`optimal_turns` x seconds per optimal turn), adds the handler's
/// adjustment, and never drops below zero.
pub fn final_score(
    config: &EngineConfig,
    turn_count: u32,
    optimal_turns: u32,
    elapsed: chrono::Duration,
    adjustment: i64,
) -> i64 {
    let extra_turns = i64::from(turn_count.saturating_sub(optimal_turns));

    let expected_ms = i64::from(optimal_turns)
        .saturating_mul(secs_to_ms(config.seconds_per_optimal_turn));
    let extra_ms = (elapsed.num_milliseconds() - expected_ms).max(0);
    let period_ms = secs_to_ms(config.seconds_per_time_penalty_point).max(1);

    let score = config.seed_score - extra_turns.saturating_mul(config.turn_penalty)
        - extra_ms / period_ms
        + adjustment;
    score.max(0)
}

fn secs_to_ms(secs: u64) -> i64 {
    i64::try_from(secs).unwrap_or(i64::MAX / 1000).saturating_mul(1000)
}
