//! Push endpoint: WebSocket upgrade handler and connection lifecycle.
//!
//! Route: `GET /notification/todo`. For each connection the handler
//! registers a `PushSession`, starts a bound `QueueConsumer` as a
//! background task, and then sits in the receive loop - the client is
//! not required to send anything, but awaiting its input is what keeps
//! the session alive and detects the disconnect.
//!
//! Teardown runs on every exit path, in this order: deactivate the
//! session, cancel the consumer task, await its completion, unregister.
//! The consumer releases its broker channel before the join completes,
//! so nothing keeps consuming for a client that is gone.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};

use crate::adapters::broker::{BrokerConnection, QueueConsumer};
use crate::domain::foundation::DomainError;
use crate::domain::todo::TodoEvent;
use crate::ports::EventSink;

use super::registry::PushRegistry;
use super::session::PushSession;

/// State for the push endpoint.
#[derive(Clone)]
pub struct NotificationState {
    pub registry: Arc<PushRegistry>,
    pub broker: Arc<BrokerConnection>,
}

impl NotificationState {
    pub fn new(registry: Arc<PushRegistry>, broker: Arc<BrokerConnection>) -> Self {
        Self { registry, broker }
    }
}

/// Router for the push endpoint.
pub fn notification_router(state: NotificationState) -> Router {
    Router::new()
        .route("/notification/todo", get(ws_handler))
        .with_state(state)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<NotificationState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Sink forwarding decoded events over the client's WebSocket.
pub struct WsEventSink {
    sender: SplitSink<WebSocket, Message>,
}

impl WsEventSink {
    fn new(sender: SplitSink<WebSocket, Message>) -> Self {
        Self { sender }
    }

    /// Actively closes the socket with an error status. Only used when
    /// the server's own processing failed; ordinary client disconnects
    /// are left to the framework.
    async fn close_with_error(&mut self) {
        let frame = CloseFrame {
            code: close_code::ERROR,
            reason: "internal error".into(),
        };
        if let Err(e) = self.sender.send(Message::Close(Some(frame))).await {
            tracing::debug!("Error close frame not sent: {}", e);
        }
    }
}

#[async_trait]
impl EventSink for WsEventSink {
    async fn forward(&mut self, event: TodoEvent) -> Result<(), DomainError> {
        let json = serde_json::to_string(&event)
            .map_err(|e| DomainError::internal(format!("Event serialization failed: {}", e)))?;
        self.sender
            .send(Message::Text(json))
            .await
            .map_err(|e| DomainError::internal(format!("Socket send failed: {}", e)))
    }
}

async fn handle_socket(socket: WebSocket, state: NotificationState) {
    let (sender, mut receiver) = socket.split();
    let mut sink = WsEventSink::new(sender);

    let session = Arc::new(PushSession::new());
    let connections = state.registry.register(session.clone()).await;
    tracing::info!(
        client_id = %session.client_id(),
        connections,
        "Push client connected"
    );

    // Start the bound consumer as a background task.
    let tag = format!("push-{}", session.client_id());
    let consumer = match QueueConsumer::start(&state.broker, tag).await {
        Ok(consumer) => consumer,
        Err(e) => {
            tracing::error!(client_id = %session.client_id(), "Consumer start failed: {}", e);
            sink.close_with_error().await;
            state.registry.unregister(session.client_id()).await;
            return;
        }
    };
    let consumer_task = tokio::spawn(consumer.run(
        session.clone(),
        sink,
        session.cancellation_token(),
    ));

    // Receive loop: any client frame keeps the session alive.
    let mut server_error = false;
    while let Some(next) = receiver.next().await {
        match next {
            Ok(Message::Close(_)) => {
                tracing::info!(client_id = %session.client_id(), "Push client closed");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(client_id = %session.client_id(), "Receive error: {}", e);
                server_error = true;
                break;
            }
        }
    }

    // Teardown: gate forwarding first, then cancel the consumer and
    // await it before releasing anything it might still touch.
    session.deactivate();
    session.cancel();
    match consumer_task.await {
        Ok(mut sink) => {
            if server_error {
                sink.close_with_error().await;
            }
        }
        Err(e) => {
            tracing::error!(client_id = %session.client_id(), "Consumer task failed: {}", e);
        }
    }

    let remaining = state.registry.unregister(session.client_id()).await;
    tracing::info!(
        client_id = %session.client_id(),
        connections = remaining,
        "Push client disconnected"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrokerConfig;

    #[test]
    fn notification_state_is_cloneable() {
        let state = NotificationState::new(
            Arc::new(PushRegistry::new()),
            Arc::new(BrokerConnection::new(&BrokerConfig::default())),
        );
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.registry, &cloned.registry));
    }

    #[test]
    fn notification_router_builds() {
        let state = NotificationState::new(
            Arc::new(PushRegistry::new()),
            Arc::new(BrokerConnection::new(&BrokerConfig::default())),
        );
        let _router = notification_router(state);
    }
}
