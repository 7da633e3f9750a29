//! Push session state shared between the socket handler and its
//! queue consumer.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Unique identifier for one push connection, generated server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One live push connection.
///
/// The `active` flag gates forwarding: teardown clears it *before*
/// cancelling the consumer, so a delivery racing the disconnect quietly
/// no-ops instead of writing to a half-closed socket. The cancellation
/// token is the only other state the socket handler and the consumer
/// task share.
pub struct PushSession {
    client_id: ClientId,
    active: AtomicBool,
    token: CancellationToken,
}

impl PushSession {
    pub fn new() -> Self {
        Self {
            client_id: ClientId::new(),
            active: AtomicBool::new(true),
            token: CancellationToken::new(),
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Whether inbound messages should still be forwarded to the client.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stops forwarding. Called first on every teardown path.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Token the bound consumer task selects on.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Requests cancellation of the bound consumer task.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Default for PushSession {
    fn default() -> Self {
        Self::new()
    }
}
