//! Bell-timer mini-game.
//!
//! Ring the bell twice with roughly ten seconds between the rings. A second
//! ring outside the window does not end the game; it becomes the new first
//! ring. All timing goes through the injected [`Clock`].

use std::sync::Arc;

use aw_core::{ActionResult, Clock, HandlerFactory, ScenarioHandler, WinCheck};
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

/// Shortest accepted gap between rings, in seconds.
const WINDOW_MIN_SECS: f64 = 8.0;
/// Longest accepted gap between rings, in seconds.
const WINDOW_MAX_SECS: f64 = 12.0;
/// Accepted countdown lengths.
const TIMER_RANGE: std::ops::RangeInclusive<u32> = 1..=60;
/// Bonus for winning without a false start.
const CLEAN_WIN_BONUS: i64 = 100;

/// Factory for bell-timer handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellTimerScenario;

impl HandlerFactory for BellTimerScenario {
    fn create_handler(&self, clock: Arc<dyn Clock>) -> Box<dyn ScenarioHandler> {
        Box::new(BellTimerHandler::new(clock))
    }
}

/// Per-session bell-timer state.
pub struct BellTimerHandler {
    clock: Arc<dyn Clock>,
    rings: u32,
    first_ring: Option<DateTime<Utc>>,
    timer_seconds: u32,
    timer_started_at: Option<DateTime<Utc>>,
    timer_expired: bool,
    won: bool,
}

impl std::fmt::Debug for BellTimerHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BellTimerHandler")
            .field("rings", &self.rings)
            .field("first_ring", &self.first_ring)
            .field("timer_seconds", &self.timer_seconds)
            .field("won", &self.won)
            .finish_non_exhaustive()
    }
}

impl BellTimerHandler {
    /// A fresh game reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            rings: 0,
            first_ring: None,
            timer_seconds: 0,
            timer_started_at: None,
            timer_expired: false,
            won: false,
        }
    }

    /// Rings counted since the last reset.
    pub fn rings(&self) -> u32 {
        self.rings
    }

    /// Whether the winning ring has happened.
    pub fn has_won(&self) -> bool {
        self.won
    }

    fn timer_active(&self) -> bool {
        self.timer_started_at.is_some() && !self.timer_expired
    }

    fn ring(&mut self) -> ActionResult {
        self.rings += 1;
        let now = self.clock.now();

        let Some(first) = self.first_ring else {
            self.first_ring = Some(now);
            return ActionResult::ok(
                "DING! You ring the bell. The sound echoes through the room. (Ring #1)",
            );
        };

        // Millisecond precision, same as the display.
        let elapsed = (now - first).num_milliseconds() as f64 / 1000.0;
        debug!(elapsed, rings = self.rings, "bell rung");

        if (WINDOW_MIN_SECS..=WINDOW_MAX_SECS).contains(&elapsed) {
            self.won = true;
            return ActionResult::ok(format!(
                "DING! Perfect timing! {elapsed:.1}s between rings. You win!"
            ));
        }

        let message = if elapsed < WINDOW_MIN_SECS {
            format!(
                "DING! Too soon! Only {elapsed:.1}s since first ring. Need ~10s. Resetting."
            )
        } else {
            format!("DING! Too late! {elapsed:.1}s since first ring. Need ~10s. Resetting.")
        };

        self.first_ring = Some(now);
        self.rings = 1;
        ActionResult::fail(message)
    }

    fn set_timer(&mut self, arg: Option<&str>) -> ActionResult {
        let seconds = arg.and_then(|a| a.trim().parse::<u32>().ok());
        let Some(seconds) = seconds.filter(|s| TIMER_RANGE.contains(s)) else {
            return ActionResult::fail("Usage: s <seconds> (1-60)");
        };

        self.timer_seconds = seconds;
        self.timer_started_at = Some(self.clock.now());
        self.timer_expired = false;

        ActionResult::ok(format!(
            "Timer set for {seconds} seconds. Use \"w\" to wait for it."
        ))
    }

    fn wait(&mut self) -> ActionResult {
        let Some(started) = self.timer_started_at.filter(|_| !self.timer_expired) else {
            return ActionResult::fail("No active timer. Use \"s <seconds>\" to set one first.");
        };

        let deadline = started + chrono::Duration::seconds(i64::from(self.timer_seconds));
        let remaining = deadline - self.clock.now();
        self.timer_expired = true;

        match remaining.to_std() {
            Ok(remaining) if !remaining.is_zero() => {
                self.clock.sleep(remaining);
                ActionResult::ok(format!(
                    "Tick... tock... BEEP! The {}-second timer has expired.",
                    self.timer_seconds
                ))
            }
            _ => ActionResult::ok("The timer has already expired!"),
        }
    }
}

impl ScenarioHandler for BellTimerHandler {
    fn initial_message(&self) -> String {
        [
            "Bell Timer Challenge",
            "",
            "You stand in a small room with a bell and a timer device.",
            "Ring the bell twice with approximately 10 seconds between rings to win.",
            "",
            "Commands: r (ring bell), s <seconds> (set timer), w (wait for timer)",
        ]
        .join("\n")
    }

    fn help(&self) -> String {
        [
            "  r                         Ring the bell",
            "  s <seconds>               Set the timer (1-60 seconds)",
            "  w                         Wait for the timer to expire",
        ]
        .join("\n")
    }

    fn execute_command(&mut self, command: &str, args: &[String]) -> ActionResult {
        match command.to_lowercase().as_str() {
            "r" => self.ring(),
            "s" => self.set_timer(args.first().map(String::as_str)),
            "w" => self.wait(),
            "help" | "h" | "?" => ActionResult::ok(self.help()),
            other => ActionResult::fail(format!(
                "Unknown command: {other}. Use r (ring), s <seconds> (set timer), or w (wait)."
            )),
        }
    }

    fn check_win_condition(&self) -> WinCheck {
        if self.won {
            WinCheck::won("You rang the bell with perfect timing!")
        } else {
            WinCheck::pending()
        }
    }

    fn state(&self) -> serde_json::Value {
        json!({
            "bell_rung_count": self.rings,
            "timer_seconds": self.timer_seconds,
            "timer_active": self.timer_active(),
            "timer_expired": self.timer_expired,
            "won": self.won,
        })
    }

    fn score_adjustment(&self) -> i64 {
        if self.won && self.rings == 2 {
            CLEAN_WIN_BONUS
        } else {
            0
        }
    }
}
