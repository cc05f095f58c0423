use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::language::Language;
use crate::transcript::Transcript;

pub const MAX_SESSION_ID_LEN: usize = 64;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid session id: expected 1 to {max} ASCII letters, digits, '-' or '_'",
    max = MAX_SESSION_ID_LEN
)]
pub struct InvalidSessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session limit of {0} reached")]
pub struct SessionLimitReached(pub usize);

/// Client-chosen session key. Short, ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    pub const DEFAULT: &'static str = "default";

    pub fn parse(id: impl Into<String>) -> Result<Self, InvalidSessionId> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= MAX_SESSION_ID_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        if valid { Ok(Self(id)) } else { Err(InvalidSessionId) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl TryFrom<String> for SessionId {
    type Error = InvalidSessionId;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::parse(id)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub transcript: Transcript,
    pub language: Language,
}

/// Sessions keyed by id, created on first use and kept for the lifetime of
/// the process, up to a fixed number of sessions.
///
/// Each session sits behind its own mutex. A turn holds that lock until its
/// reply is recorded, so concurrent turns on one session are serialized
/// while different sessions proceed independently.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>>,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::default(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Existing sessions are always returned; a new one is refused once the
    /// store holds `max_sessions`.
    pub async fn get_or_create(
        &self,
        id: &SessionId,
    ) -> Result<Arc<Mutex<Session>>, SessionLimitReached> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return Ok(session.clone());
        }

        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get(id) {
            return Ok(session.clone());
        }
        if sessions.len() >= self.max_sessions {
            tracing::warn!(limit = self.max_sessions, "session_limit_reached");
            return Err(SessionLimitReached(self.max_sessions));
        }

        let session = Arc::new(Mutex::new(Session::default()));
        sessions.insert(id.clone(), session.clone());
        Ok(session)
    }

    pub async fn get(&self, id: &SessionId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
