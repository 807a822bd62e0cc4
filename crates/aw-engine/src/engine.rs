//! The game engine: session lifecycle and the turn protocol.

use std::sync::Arc;

use aw_core::{
    ActionResult, Clock, GameStatus, ScenarioCatalog, ScenarioSummary, SystemClock,
};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::report::{GameStats, SessionSnapshot};
use crate::score::final_score;
use crate::session::{GameState, Session, SessionId, SessionStore, SharedSession, lock};

/// A freshly created session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    /// Id to address the session with.
    pub session_id: SessionId,
    /// The handler's opening text.
    pub initial_message: String,
}

/// Owns the scenario catalog and every live session.
///
/// All operations take `&self`, so one engine can be shared across threads.
/// Each session has its own lock: a command that blocks, such as waiting on a
/// timer, only holds up its own session.
pub struct GameEngine {
    catalog: ScenarioCatalog,
    sessions: SessionStore,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("scenarios", &self.catalog.len())
            .field("sessions", &self.sessions)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// An engine over `catalog` using wall-clock time.
    pub fn new(catalog: ScenarioCatalog) -> Self {
        Self::with_clock(catalog, Arc::new(SystemClock))
    }

    /// An engine over `catalog` reading time from `clock`.
    pub fn with_clock(catalog: ScenarioCatalog, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            sessions: SessionStore::new(),
            clock,
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The scenario catalog.
    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    /// Listing of every playable scenario.
    pub fn scenarios(&self) -> Vec<ScenarioSummary> {
        self.catalog.list()
    }

    /// Number of stored sessions, live or ended.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Start a new session of `scenario_id` for `agent_id`.
    pub fn create_game(&self, agent_id: &str, scenario_id: &str) -> EngineResult<NewGame> {
        let Some(scenario) = self.catalog.get(scenario_id) else {
            warn!(scenario = scenario_id, "create_game for unknown scenario");
            return Err(EngineError::ScenarioNotFound(scenario_id.to_string()));
        };

        let session_id = SessionId::new();
        let handler = scenario.create_handler(Arc::clone(&self.clock));
        let initial_message = handler.initial_message();
        let now = self.clock.now();

        let game = GameState {
            session_id,
            scenario_id: scenario_id.to_string(),
            agent_id: agent_id.to_string(),
            status: GameStatus::InProgress,
            turn_count: 0,
            start_time: now,
            end_time: None,
            score: self.config.seed_score,
        };

        info!(session = %session_id, scenario = scenario_id, agent = agent_id, "game created");
        self.sessions.insert(Session {
            game,
            handler,
            scenario,
            last_activity: now,
        });

        Ok(NewGame {
            session_id,
            initial_message,
        })
    }

    /// Run one command against a live session.
    ///
    /// Every accepted command costs a turn, whether or not it succeeds in the
    /// game. The time limit is checked before the win condition, so a win
    /// reached after the limit still fails the session. Unknown or ended
    /// sessions are rejected without any change.
    pub fn execute_command(
        &self,
        id: SessionId,
        command: &str,
        args: &[String],
    ) -> EngineResult<ActionResult> {
        let Some(shared) = self.sessions.get(id) else {
            warn!(session = %id, "command for unknown session");
            return Err(EngineError::SessionNotFound(id));
        };
        let mut guard = lock(&shared);
        let session = &mut *guard;
        if session.game.status.is_terminal() {
            warn!(session = %id, status = %session.game.status, "command for ended session");
            return Err(EngineError::SessionEnded {
                id,
                status: session.game.status,
            });
        }

        debug!(session = %id, command, ?args, "executing command");
        let mut result = session.handler.execute_command(command, args);

        let game = &mut session.game;
        game.turn_count = game.turn_count.saturating_add(1);
        result.turn_count = game.turn_count;

        let now = self.clock.now();
        session.last_activity = now;

        if let Some(limit) = session.scenario.info().time_limit() {
            if now - game.start_time > limit {
                game.status = GameStatus::Failed;
                game.end_time = Some(now);
                game.score = 0;
                info!(session = %id, turn = game.turn_count, "game failed: time limit exceeded");
                result.game_status = Some(GameStatus::Failed);
                return Ok(result);
            }
        }

        let win = session.handler.check_win_condition();
        if win.won {
            game.status = GameStatus::Completed;
            game.end_time = Some(now);
            game.score = final_score(
                &self.config,
                game.turn_count,
                session.scenario.info().optimal_turns,
                now - game.start_time,
                session.handler.score_adjustment(),
            );
            if let Some(message) = win.message {
                result.message = format!("{}\n\n{message}", result.message);
            }
            info!(
                session = %id,
                turn = game.turn_count,
                score = game.score,
                "game completed"
            );
        }

        result.game_status = Some(game.status);
        Ok(result)
    }

    /// The engine-owned record of a session.
    pub fn game(&self, id: SessionId) -> EngineResult<GameState> {
        let shared = self.session(id)?;
        let session = lock(&shared);
        Ok(session.game.clone())
    }

    /// Full state of a session, including the handler's own view.
    pub fn get_state(&self, id: SessionId) -> EngineResult<SessionSnapshot> {
        let shared = self.session(id)?;
        let session = lock(&shared);
        Ok(SessionSnapshot {
            game: session.game.clone(),
            elapsed_ms: session.game.elapsed(self.clock.now()).num_milliseconds(),
            scenario_state: session.handler.state(),
        })
    }

    /// The command reference of a session's scenario.
    pub fn get_help(&self, id: SessionId) -> EngineResult<String> {
        let shared = self.session(id)?;
        let help = lock(&shared).handler.help();
        Ok(help)
    }

    /// Summary of an ended session.
    pub fn stats(&self, id: SessionId) -> EngineResult<GameStats> {
        let shared = self.session(id)?;
        let session = lock(&shared);
        let game = &session.game;
        if !game.status.is_terminal() {
            return Err(EngineError::SessionInProgress(id));
        }
        let time_spent = game.elapsed(self.clock.now());
        Ok(GameStats::from_game(game, time_spent.num_milliseconds()))
    }

    /// Drop sessions with no accepted activity within the idle timeout.
    pub fn sweep_idle(&self) -> Vec<SessionId> {
        let cutoff = self.clock.now() - self.config.idle_timeout();
        let removed = self.sessions.remove_idle(cutoff);
        for id in &removed {
            warn!(session = %id, "reclaimed idle session");
        }
        removed
    }

    fn session(&self, id: SessionId) -> EngineResult<SharedSession> {
        self.sessions
            .get(id)
            .ok_or(EngineError::SessionNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, mpsc};
    use std::thread;
    use std::time::Duration;

    use aw_core::{ManualClock, split_command};
    use chrono::{DateTime, Utc};
    use aw_handlers::builtin_catalog;
    use proptest::prelude::*;

    fn setup() -> (Arc<ManualClock>, GameEngine) {
        let clock = Arc::new(ManualClock::default());
        let engine = GameEngine::with_clock(builtin_catalog().unwrap(), clock.clone());
        (clock, engine)
    }

    fn send(engine: &GameEngine, id: SessionId, line: &str) -> ActionResult {
        let (verb, args) = split_command(line).unwrap();
        engine.execute_command(id, &verb, &args).unwrap()
    }

    #[test]
    fn create_game_returns_initial_message() {
        let (_, engine) = setup();
        let game = engine.create_game("agent-1", "cellar_escape").unwrap();
        assert!(game.initial_message.starts_with("Foot of the Stairs"));

        let state = engine.game(game.session_id).unwrap();
        assert_eq!(state.status, GameStatus::InProgress);
        assert_eq!(state.turn_count, 0);
        assert_eq!(state.score, 1000);
        assert_eq!(state.agent_id, "agent-1");
    }

    #[test]
    fn unknown_scenario() {
        let (_, engine) = setup();
        assert_eq!(
            engine.create_game("a", "moon_base"),
            Err(EngineError::ScenarioNotFound("moon_base".to_string()))
        );
        assert_eq!(engine.session_count(), 0);
    }

    #[test]
    fn cellar_end_to_end() {
        let (_, engine) = setup();
        let id = engine.create_game("a", "cellar_escape").unwrap().session_id;

        let missing = send(&engine, id, "take iron key");
        assert!(!missing.success);

        assert!(send(&engine, id, "e").success);
        let locked = send(&engine, id, "s");
        assert!(!locked.success);
        assert!(locked.message.contains("locked"));
        assert_eq!(locked.game_status, Some(GameStatus::InProgress));

        assert!(send(&engine, id, "take iron key").success);
        let snapshot = engine.get_state(id).unwrap();
        let room = &snapshot.scenario_state["current_room_data"];
        assert_eq!(room["id"], "wine_cellar");
        assert!(
            room["objects"]
                .as_array()
                .unwrap()
                .iter()
                .all(|o| o["id"] != "iron_key")
        );

        let out = send(&engine, id, "s");
        assert!(out.success);
        assert_eq!(out.turn_count, 5);
        assert_eq!(out.game_status, Some(GameStatus::Completed));
        assert_eq!(out.message, "You enter the Cellar Hatch.\n\nYou escaped!");

        // One turn over optimal; three rooms visited.
        let game = engine.game(id).unwrap();
        assert_eq!(game.score, 1000 - 5 + 30);
        assert!(game.end_time.is_some());
    }

    #[test]
    fn library_walkthrough_score() {
        let (clock, engine) = setup();
        let id = engine.create_game("a", "library_escape").unwrap().session_id;
        for line in [
            "north",
            "take cipher book",
            "east",
            "solve cipher_puzzle  Hello World ",
            "east",
            "take golden key",
        ] {
            clock.advance_ms(5_000);
            let result = send(&engine, id, line);
            assert!(result.success, "{line}: {}", result.message);
        }
        let out = send(&engine, id, "south");
        assert_eq!(out.game_status, Some(GameStatus::Completed));
        assert_eq!(engine.game(id).unwrap().score, 1150);
    }

    #[test]
    fn bell_timer_with_manual_clock() {
        let (clock, engine) = setup();
        let id = engine.create_game("a", "bell_timer").unwrap().session_id;
        send(&engine, id, "r");
        send(&engine, id, "s 10");
        let waited = send(&engine, id, "w");
        assert_eq!(waited.game_status, Some(GameStatus::InProgress));
        let waited_for = clock.now() - engine.game(id).unwrap().start_time;
        assert_eq!(waited_for.num_seconds(), 10);

        let out = send(&engine, id, "r");
        assert_eq!(out.game_status, Some(GameStatus::Completed));
        assert!(out.message.ends_with("You rang the bell with perfect timing!"));
        assert_eq!(engine.game(id).unwrap().score, 1100);
    }

    #[test]
    fn time_limit_beats_win() {
        let (clock, engine) = setup();
        let id = engine.create_game("a", "cellar_escape").unwrap().session_id;
        send(&engine, id, "e");
        send(&engine, id, "take iron key");
        clock.advance_ms(121_000);

        let out = send(&engine, id, "s");
        assert!(out.success);
        assert_eq!(out.game_status, Some(GameStatus::Failed));
        assert!(!out.message.contains("escaped"));

        let game = engine.game(id).unwrap();
        assert_eq!(game.status, GameStatus::Failed);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn ended_session_rejects_commands() {
        let (clock, engine) = setup();
        let id = engine.create_game("a", "bell_timer").unwrap().session_id;
        clock.advance_ms(61_000);
        send(&engine, id, "r");

        let before = engine.game(id).unwrap();
        let err = engine.execute_command(id, "r", &[]).unwrap_err();
        assert_eq!(
            err,
            EngineError::SessionEnded {
                id,
                status: GameStatus::Failed
            }
        );
        assert_eq!(engine.game(id).unwrap(), before);
    }

    #[test]
    fn unknown_session() {
        let (_, engine) = setup();
        let stranger = SessionId::new();
        assert_eq!(
            engine.execute_command(stranger, "look", &[]),
            Err(EngineError::SessionNotFound(stranger))
        );
        assert!(engine.get_state(stranger).is_err());
        assert!(engine.get_help(stranger).is_err());
    }

    #[test]
    fn unknown_verb_costs_a_turn() {
        let (_, engine) = setup();
        let id = engine.create_game("a", "library_escape").unwrap().session_id;
        let out = send(&engine, id, "fly");
        assert!(!out.success);
        assert!(out.message.contains("fly"));
        assert_eq!(out.turn_count, 1);
        assert_eq!(out.game_status, Some(GameStatus::InProgress));
    }

    #[test]
    fn sessions_are_isolated() {
        let (_, engine) = setup();
        let first = engine.create_game("a", "cellar_escape").unwrap().session_id;
        let second = engine.create_game("b", "cellar_escape").unwrap().session_id;
        send(&engine, first, "e");
        send(&engine, first, "take iron key");

        send(&engine, second, "e");
        assert!(send(&engine, second, "take iron key").success);
        assert_eq!(engine.game(second).unwrap().turn_count, 2);
    }

    #[test]
    fn help_comes_from_the_handler() {
        let (_, engine) = setup();
        let id = engine.create_game("a", "bell_timer").unwrap().session_id;
        assert!(engine.get_help(id).unwrap().contains("Ring the bell"));
        assert_eq!(engine.game(id).unwrap().turn_count, 0);
    }

    #[test]
    fn stats_only_for_ended_sessions() {
        let (clock, engine) = setup();
        let id = engine.create_game("bot", "bell_timer").unwrap().session_id;
        assert_eq!(engine.stats(id), Err(EngineError::SessionInProgress(id)));

        send(&engine, id, "r");
        clock.advance_ms(9_500);
        send(&engine, id, "r");
        clock.advance_ms(60_000);

        let stats = engine.stats(id).unwrap();
        assert_eq!(stats.status, GameStatus::Completed);
        assert_eq!(stats.agent_id, "bot");
        assert_eq!(stats.scenario_id, "bell_timer");
        assert_eq!(stats.turn_count, 2);
        assert_eq!(stats.time_spent_ms, 9_500);
        assert_eq!(stats.score, 1100);
    }

    #[test]
    fn snapshot_reports_elapsed_time() {
        let (clock, engine) = setup();
        let id = engine.create_game("a", "library_escape").unwrap().session_id;
        clock.advance_ms(1_234);
        let snapshot = engine.get_state(id).unwrap();
        assert_eq!(snapshot.elapsed_ms, 1_234);
        assert_eq!(snapshot.scenario_state["current_room"], "entrance");
        assert_eq!(snapshot.game.session_id, id);
    }

    #[test]
    fn sweep_reclaims_idle_sessions() {
        let (clock, engine) = setup();
        let idle = engine.create_game("a", "library_escape").unwrap().session_id;
        let busy = engine.create_game("b", "library_escape").unwrap().session_id;

        clock.advance_ms(10 * 60_000);
        send(&engine, busy, "look");
        clock.advance_ms(25 * 60_000);

        assert_eq!(engine.sweep_idle(), vec![idle]);
        assert_eq!(engine.session_count(), 1);
        assert!(engine.game(busy).is_ok());
        assert_eq!(
            engine.execute_command(idle, "look", &[]),
            Err(EngineError::SessionNotFound(idle))
        );
    }

    #[test]
    fn custom_config_changes_seed() {
        let clock = Arc::new(ManualClock::default());
        let engine = GameEngine::with_clock(builtin_catalog().unwrap(), clock)
            .with_config(EngineConfig::default().with_seed_score(500));
        let id = engine.create_game("a", "bell_timer").unwrap().session_id;
        assert_eq!(engine.game(id).unwrap().score, 500);
    }

    /// Manual time whose `sleep` parks until the test lets it go.
    struct GatedClock {
        inner: ManualClock,
        entered: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl Clock for GatedClock {
        fn now(&self) -> DateTime<Utc> {
            self.inner.now()
        }

        fn sleep(&self, duration: std::time::Duration) {
            self.entered.lock().unwrap().send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
            self.inner.sleep(duration);
        }
    }

    #[test]
    fn waiting_session_does_not_block_others() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let clock = Arc::new(GatedClock {
            inner: ManualClock::default(),
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        });
        let engine = Arc::new(GameEngine::with_clock(builtin_catalog().unwrap(), clock));
        let bell = engine.create_game("a", "bell_timer").unwrap().session_id;
        let library = engine.create_game("b", "library_escape").unwrap().session_id;
        send(&engine, bell, "s 5");

        let waiter = {
            let engine = Arc::clone(&engine);
            thread::spawn(move || send(&engine, bell, "w"))
        };
        entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // The bell session is mid-command; the library session still runs.
        let look = send(&engine, library, "look");
        assert!(look.success);
        assert_eq!(engine.game(library).unwrap().turn_count, 1);
        assert!(engine.sweep_idle().is_empty());

        release_tx.send(()).unwrap();
        let waited = waiter.join().unwrap();
        assert!(waited.message.contains("BEEP"));
        assert_eq!(engine.game(bell).unwrap().turn_count, 2);
    }

    const VOCABULARY: &[&str] = &[
        "n", "s", "e", "w", "look", "take iron key", "take candle", "use barrel", "i", "fly",
        "solve cellar_riddle bottle", "hint cellar_riddle", "examine barrel", "",
    ];

    proptest! {
        #[test]
        fn turn_count_rises_by_one(picks in prop::collection::vec(0..VOCABULARY.len(), 1..30)) {
            let (_, engine) = setup();
            let id = engine.create_game("p", "cellar_escape").unwrap().session_id;
            let mut last = 0;
            for pick in picks {
                let (verb, args) = split_command(VOCABULARY[pick]).unwrap_or_default();
                let result = engine.execute_command(id, &verb, &args);
                match result {
                    Ok(result) => {
                        prop_assert_eq!(result.turn_count, last + 1);
                        last = result.turn_count;
                    }
                    Err(err) => {
                        let ended = matches!(err, EngineError::SessionEnded { .. });
                        prop_assert!(ended);
                        prop_assert_eq!(engine.game(id).unwrap().turn_count, last);
                    }
                }
                prop_assert!(engine.game(id).unwrap().score >= 0);
            }
        }
    }
}
