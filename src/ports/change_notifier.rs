//! ChangeNotifier port - publishes task-change events to the broker.
//!
//! The mutation path calls this after its database change commits, never
//! before: clients must not observe a notification for a change that
//! could still roll back.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::todo::TodoEvent;

/// Port for publishing change-notification events.
///
/// Implementations must surface transport failures to the caller rather
/// than silently dropping the event; the *caller* decides whether the
/// failure is fatal (the application services log and continue, keeping
/// the HTTP mutation successful).
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    /// Serializes and publishes one event for durable delivery.
    async fn notify(&self, event: TodoEvent) -> Result<(), DomainError>;
}
