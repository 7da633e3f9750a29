//! Process-wide registry of active push sessions.
//!
//! Mutated only by the connect/disconnect paths of the socket handler;
//! the count feeds connection logging and diagnostics.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::session::{ClientId, PushSession};

/// Registry of live push connections.
pub struct PushRegistry {
    sessions: RwLock<HashMap<ClientId, Arc<PushSession>>>,
}

impl PushRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a session on connect. Returns the number of live
    /// sessions including this one.
    pub async fn register(&self, session: Arc<PushSession>) -> usize {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.client_id().clone(), session);
        sessions.len()
    }

    /// Removes a session on disconnect. Returns the number of sessions
    /// remaining.
    pub async fn unregister(&self, client_id: &ClientId) -> usize {
        let mut sessions = self.sessions.write().await;
        sessions.remove(client_id);
        sessions.len()
    }

    /// Number of currently connected push clients.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the given client is still registered.
    pub async fn contains(&self, client_id: &ClientId) -> bool {
        self.sessions.read().await.contains_key(client_id)
    }
}

impl Default for PushRegistry {
    fn default() -> Self {
        Self::new()
    }
}
