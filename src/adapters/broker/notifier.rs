//! AMQP implementation of the ChangeNotifier port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::broker::BrokerConnection;
use crate::domain::foundation::DomainError;
use crate::domain::todo::TodoEvent;
use crate::ports::ChangeNotifier;

/// Publishes task-change events to the durable notification queue.
pub struct AmqpChangeNotifier {
    connection: Arc<BrokerConnection>,
    queue: String,
}

impl AmqpChangeNotifier {
    /// Creates a notifier publishing to the connection's notification
    /// queue.
    pub fn new(connection: Arc<BrokerConnection>) -> Self {
        let queue = connection.notification_queue().to_string();
        Self { connection, queue }
    }
}

#[async_trait]
impl ChangeNotifier for AmqpChangeNotifier {
    async fn notify(&self, event: TodoEvent) -> Result<(), DomainError> {
        let payload = serde_json::to_vec(&event)
            .map_err(|e| DomainError::internal(format!("Event serialization failed: {}", e)))?;

        self.connection.publish(&self.queue, &payload).await?;

        tracing::info!(
            queue = %self.queue,
            todo_id = event.todo_id,
            action = ?event.action,
            "Published change notification"
        );
        Ok(())
    }
}
