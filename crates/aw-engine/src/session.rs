//! Session records and the session store.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use aw_core::{GameStatus, Scenario, ScenarioHandler};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// The engine-owned record of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Session id.
    pub session_id: SessionId,
    /// Scenario being played.
    pub scenario_id: String,
    /// Who is playing.
    pub agent_id: String,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Accepted commands so far.
    pub turn_count: u32,
    /// When the session was created.
    pub start_time: DateTime<Utc>,
    /// When the session reached a terminal status.
    pub end_time: Option<DateTime<Utc>>,
    /// Seed score while playing; final score once completed; 0 once failed.
    pub score: i64,
}

impl GameState {
    /// Time spent so far, or in total once the session has ended.
    pub fn elapsed(&self, now: DateTime<Utc>) -> chrono::Duration {
        self.end_time.unwrap_or(now) - self.start_time
    }
}

/// A live session: its record plus the handler that owns its rules state.
pub(crate) struct Session {
    pub(crate) game: GameState,
    pub(crate) handler: Box<dyn ScenarioHandler>,
    pub(crate) scenario: Arc<Scenario>,
    pub(crate) last_activity: DateTime<Utc>,
}

/// A session behind its own lock, so one session's blocking command never
/// holds up another.
pub(crate) type SharedSession = Arc<Mutex<Session>>;

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sessions keyed by id.
///
/// The map lock is held only for lookups and bookkeeping; commands run
/// under the per-session lock.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.len())
            .finish()
    }
}

impl SessionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, session: Session) {
        let id = session.game.session_id;
        lock(&self.sessions).insert(id, Arc::new(Mutex::new(session)));
    }

    pub(crate) fn get(&self, id: SessionId) -> Option<SharedSession> {
        lock(&self.sessions).get(&id).map(Arc::clone)
    }

    /// Remove sessions idle since before `cutoff`, returning their ids.
    /// A session busy with a command is active and stays.
    pub(crate) fn remove_idle(&self, cutoff: DateTime<Utc>) -> Vec<SessionId> {
        let mut removed = Vec::new();
        lock(&self.sessions).retain(|id, session| {
            let idle = match session.try_lock() {
                Ok(s) => s.last_activity < cutoff,
                Err(TryLockError::Poisoned(e)) => e.into_inner().last_activity < cutoff,
                Err(TryLockError::WouldBlock) => false,
            };
            if idle {
                removed.push(*id);
            }
            !idle
        });
        removed
    }

    /// Whether a session with this id exists.
    pub fn contains(&self, id: SessionId) -> bool {
        lock(&self.sessions).contains_key(&id)
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        lock(&self.sessions).is_empty()
    }
}
