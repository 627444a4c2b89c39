use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::deck::Deck;

use super::turn::History;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One conversation: a private deck and a private history.
#[derive(Debug, Clone, Default)]
pub struct Session {
    id: SessionId,
    pub(super) deck: Deck,
    pub(super) history: History,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// HTML rendering of the current deck.
    pub fn render(&self) -> String {
        self.deck.render()
    }
}

/// Live sessions keyed by id. Each session sits behind its own lock, so two
/// conversations never touch the same deck.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> (SessionId, Arc<Mutex<Session>>) {
        let session = Session::new();
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&handle));
        log::debug!("session {id} created");
        (id, handle)
    }

    pub async fn get(&self, id: SessionId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drops the session; its deck goes with it.
    pub async fn remove(&self, id: SessionId) -> Option<Arc<Mutex<Session>>> {
        let removed = self.sessions.write().await.remove(&id);
        if removed.is_some() {
            log::debug!("session {id} removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
