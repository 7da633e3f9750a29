//! EventSink port - the consumer side's handle on one push client.
//!
//! A per-client queue consumer forwards decoded events through this seam.
//! The production implementation writes to a WebSocket; tests use an
//! in-process recorder.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::todo::TodoEvent;

/// Port for delivering one decoded event to a single connected client.
#[async_trait]
pub trait EventSink: Send {
    /// Forwards the event. A failure here is a delivery problem local to
    /// this client; it must not tear down the consumer loop.
    async fn forward(&mut self, event: TodoEvent) -> Result<(), DomainError>;
}
