//! Per-client queue consumer.
//!
//! One `QueueConsumer` runs per live push connection, on its own channel,
//! consuming the shared durable queue with manual acknowledgement. The
//! sessions compete for messages: each queued event goes to exactly one
//! of the connected consumers.
//!
//! The settle decision is an explicit two-outcome contract:
//! ack-and-drop for payload- or client-level failures (poison messages
//! must not loop forever), nack-and-requeue only for broker transport
//! failures (those messages are not lost, the broker redelivers them).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use lapin::message::Delivery;
use lapin::options::{BasicAckOptions, BasicConsumeOptions, BasicNackOptions};
use lapin::protocol::constants::REPLY_SUCCESS;
use lapin::types::FieldTable;
use lapin::Channel;
use tokio_util::sync::CancellationToken;

use crate::adapters::broker::BrokerConnection;
use crate::adapters::websocket::PushSession;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::todo::TodoEvent;
use crate::ports::EventSink;

/// What happened to one delivery.
#[derive(Debug)]
pub(crate) enum DeliveryOutcome {
    /// Decoded and forwarded to the client.
    Forwarded,
    /// Session no longer active; forwarding skipped.
    Skipped,
    /// Payload did not decode; dropped.
    BadPayload(String),
    /// Forward attempt failed.
    ForwardFailed(DomainError),
}

/// How the delivery is settled with the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settle {
    Ack,
    Requeue,
}

/// One message taken off the queue, not yet settled.
///
/// `lapin::message::Delivery` is the production implementation; tests
/// drive the loop with an in-process fake.
#[async_trait]
pub(crate) trait QueueDelivery: Send {
    fn payload(&self) -> &[u8];

    /// Settles the delivery with the broker. Exactly one settle per
    /// delivery.
    async fn settle(self, settle: Settle) -> Result<(), DomainError>;
}

#[async_trait]
impl QueueDelivery for Delivery {
    fn payload(&self) -> &[u8] {
        &self.data
    }

    async fn settle(self, settle: Settle) -> Result<(), DomainError> {
        match settle {
            Settle::Ack => self.ack(BasicAckOptions::default()).await,
            Settle::Requeue => {
                self.nack(BasicNackOptions {
                    requeue: true,
                    ..BasicNackOptions::default()
                })
                .await
            }
        }
        .map_err(|e| DomainError::broker(format!("Settle failed: {}", e)))
    }
}

/// Keyed on whether the failure is transport-level (requeue) or
/// payload/application-level (drop). Exactly one settle per delivery.
pub(crate) fn settle_for(outcome: &DeliveryOutcome) -> Settle {
    match outcome {
        DeliveryOutcome::ForwardFailed(e) if e.code() == ErrorCode::BrokerError => Settle::Requeue,
        _ => Settle::Ack,
    }
}

/// Decodes one payload and forwards it if the session still wants it.
pub(crate) async fn relay<S: EventSink>(
    payload: &[u8],
    session: &PushSession,
    sink: &mut S,
) -> DeliveryOutcome {
    let event = match serde_json::from_slice::<TodoEvent>(payload) {
        Ok(event) => event,
        Err(e) => return DeliveryOutcome::BadPayload(e.to_string()),
    };

    if !session.is_active() {
        return DeliveryOutcome::Skipped;
    }

    match sink.forward(event).await {
        Ok(()) => DeliveryOutcome::Forwarded,
        Err(e) => DeliveryOutcome::ForwardFailed(e),
    }
}

/// Consume-and-forward loop over any delivery stream.
///
/// Runs until the token is cancelled or the stream ends. The select is
/// biased towards cancellation: a cancelled token interrupts an
/// in-progress wait for the next delivery and wins over a delivery that
/// is already ready, so once this returns no further forward or settle
/// runs for the session.
pub(crate) async fn consume_loop<S, D, E, St>(
    mut deliveries: St,
    session: &PushSession,
    sink: &mut S,
    token: &CancellationToken,
    tag: &str,
) where
    S: EventSink,
    D: QueueDelivery,
    E: fmt::Display,
    St: Stream<Item = Result<D, E>> + Unpin,
{
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::info!(consumer = %tag, "Consumer cancelled");
                break;
            }
            next = deliveries.next() => match next {
                Some(Ok(delivery)) => {
                    handle_delivery(delivery, session, sink, tag).await;
                }
                Some(Err(e)) => {
                    // Broker transport trouble; the connection
                    // manager reconnects on next use, this session
                    // just ends.
                    tracing::error!(consumer = %tag, "Delivery stream error: {}", e);
                    break;
                }
                None => {
                    tracing::debug!(consumer = %tag, "Delivery stream closed");
                    break;
                }
            }
        }
    }
}

async fn handle_delivery<S, D>(delivery: D, session: &PushSession, sink: &mut S, tag: &str)
where
    S: EventSink,
    D: QueueDelivery,
{
    let outcome = relay(delivery.payload(), session, sink).await;

    match &outcome {
        DeliveryOutcome::Forwarded => {
            tracing::debug!(consumer = %tag, "Forwarded event to client");
        }
        DeliveryOutcome::Skipped => {
            tracing::debug!(consumer = %tag, "Session inactive, event skipped");
        }
        DeliveryOutcome::BadPayload(reason) => {
            tracing::error!(consumer = %tag, "Dropping malformed message: {}", reason);
        }
        DeliveryOutcome::ForwardFailed(e) => {
            tracing::warn!(consumer = %tag, "Forward failed: {}", e);
        }
    }

    if let Err(e) = delivery.settle(settle_for(&outcome)).await {
        // Unsettled messages are redelivered by the broker, so nothing
        // is lost here.
        tracing::error!(consumer = %tag, "Settle failed: {}", e);
    }
}

/// Consumer bound to exactly one push session.
pub struct QueueConsumer {
    channel: Channel,
    queue: String,
    tag: String,
}

impl QueueConsumer {
    /// Opens a dedicated channel for this consumer. The shared queue
    /// already exists; it was declared when the connection came up.
    pub async fn start(
        connection: &BrokerConnection,
        consumer_tag: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let channel = connection.create_consumer_channel().await?;
        Ok(Self {
            channel,
            queue: connection.notification_queue().to_string(),
            tag: consumer_tag.into(),
        })
    }

    /// Consume-and-forward loop. Runs until the token is cancelled or
    /// the delivery stream ends, then releases the channel and hands the
    /// sink back so the caller can close the client socket if it needs
    /// to.
    ///
    /// Cancellation interrupts an in-progress wait for the next
    /// delivery; once this returns, no further ack or forward runs for
    /// the session.
    pub async fn run<S: EventSink>(
        self,
        session: Arc<PushSession>,
        mut sink: S,
        token: CancellationToken,
    ) -> S {
        let deliveries = match self
            .channel
            .basic_consume(
                &self.queue,
                &self.tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
        {
            Ok(consumer) => consumer,
            Err(e) => {
                tracing::error!(consumer = %self.tag, "Failed to subscribe: {}", e);
                self.release().await;
                return sink;
            }
        };

        tracing::info!(consumer = %self.tag, queue = %self.queue, "Consumer subscribed");

        consume_loop(deliveries, &session, &mut sink, &token, &self.tag).await;

        self.release().await;
        sink
    }

    async fn release(&self) {
        if let Err(e) = self.channel.close(REPLY_SUCCESS, "consumer closed").await {
            tracing::debug!(consumer = %self.tag, "Channel close error: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;
    use futures::stream;
    use uuid::Uuid;

    use crate::domain::todo::{Priority, TodoItem};

    struct RecordingSink {
        received: Vec<TodoEvent>,
        fail_with: Option<DomainError>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                received: Vec::new(),
                fail_with: None,
            }
        }

        fn failing(error: DomainError) -> Self {
            Self {
                received: Vec::new(),
                fail_with: Some(error),
            }
        }
    }

    #[async_trait]
    impl EventSink for RecordingSink {
        async fn forward(&mut self, event: TodoEvent) -> Result<(), DomainError> {
            if let Some(e) = &self.fail_with {
                return Err(e.clone());
            }
            self.received.push(event);
            Ok(())
        }
    }

    struct FakeDelivery {
        payload: Vec<u8>,
        settled: Arc<Mutex<Vec<Settle>>>,
    }

    impl FakeDelivery {
        fn new(payload: impl Into<Vec<u8>>, settled: &Arc<Mutex<Vec<Settle>>>) -> Self {
            Self {
                payload: payload.into(),
                settled: settled.clone(),
            }
        }
    }

    #[async_trait]
    impl QueueDelivery for FakeDelivery {
        fn payload(&self) -> &[u8] {
            &self.payload
        }

        async fn settle(self, settle: Settle) -> Result<(), DomainError> {
            self.settled.lock().unwrap().push(settle);
            Ok(())
        }
    }

    fn sample_event() -> TodoEvent {
        TodoEvent::updated(&TodoItem {
            id: 42,
            content: "buy milk".to_string(),
            priority: Priority::High,
            completed: true,
            created_at: Utc::now(),
            list_id: 1,
            user_id: Uuid::new_v4(),
        })
    }

    #[tokio::test]
    async fn valid_event_is_forwarded_to_active_session() {
        let session = PushSession::new();
        let mut sink = RecordingSink::new();
        let payload = serde_json::to_vec(&sample_event()).unwrap();

        let outcome = relay(&payload, &session, &mut sink).await;

        assert!(matches!(outcome, DeliveryOutcome::Forwarded));
        assert_eq!(sink.received.len(), 1);
        assert_eq!(sink.received[0].todo_id, 42);
    }

    #[tokio::test]
    async fn inactive_session_skips_forwarding() {
        let session = PushSession::new();
        session.deactivate();
        let mut sink = RecordingSink::new();
        let payload = serde_json::to_vec(&sample_event()).unwrap();

        let outcome = relay(&payload, &session, &mut sink).await;

        assert!(matches!(outcome, DeliveryOutcome::Skipped));
        assert!(sink.received.is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_is_dropped_not_forwarded() {
        let session = PushSession::new();
        let mut sink = RecordingSink::new();

        let outcome = relay(b"{not json", &session, &mut sink).await;

        assert!(matches!(outcome, DeliveryOutcome::BadPayload(_)));
        assert!(sink.received.is_empty());
    }

    #[tokio::test]
    async fn consumer_survives_bad_message_then_delivers_next() {
        let session = PushSession::new();
        let mut sink = RecordingSink::new();

        let bad = relay(b"\x00\x01", &session, &mut sink).await;
        assert_eq!(settle_for(&bad), Settle::Ack);

        let payload = serde_json::to_vec(&sample_event()).unwrap();
        let good = relay(&payload, &session, &mut sink).await;
        assert!(matches!(good, DeliveryOutcome::Forwarded));
        assert_eq!(sink.received.len(), 1);
    }

    #[test]
    fn payload_and_client_failures_are_acked() {
        assert_eq!(settle_for(&DeliveryOutcome::Forwarded), Settle::Ack);
        assert_eq!(settle_for(&DeliveryOutcome::Skipped), Settle::Ack);
        assert_eq!(
            settle_for(&DeliveryOutcome::BadPayload("bad".into())),
            Settle::Ack
        );
        assert_eq!(
            settle_for(&DeliveryOutcome::ForwardFailed(DomainError::internal(
                "socket closed"
            ))),
            Settle::Ack
        );
    }

    #[test]
    fn broker_transport_failures_are_requeued() {
        let outcome = DeliveryOutcome::ForwardFailed(DomainError::broker("connection reset"));
        assert_eq!(settle_for(&outcome), Settle::Requeue);
    }

    #[tokio::test]
    async fn cancelling_interrupts_a_waiting_consumer_loop() {
        let session = Arc::new(PushSession::new());
        let settled = Arc::new(Mutex::new(Vec::<Settle>::new()));

        let loop_session = session.clone();
        let loop_token = session.cancellation_token();
        let task = tokio::spawn(async move {
            let mut sink = RecordingSink::new();
            // A stream that never yields: the loop sits in the wait for
            // the next delivery until the token fires.
            let deliveries = stream::pending::<Result<FakeDelivery, DomainError>>();
            consume_loop(deliveries, &loop_session, &mut sink, &loop_token, "test").await;
            sink
        });

        session.cancel();
        let sink = task.await.expect("loop should stop after cancellation");

        assert!(sink.received.is_empty());
        assert!(settled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_forward_or_settle_runs_after_cancellation() {
        let session = PushSession::new();
        let token = session.cancellation_token();
        session.deactivate();
        session.cancel();

        let settled = Arc::new(Mutex::new(Vec::new()));
        let payload = serde_json::to_vec(&sample_event()).unwrap();
        // Both deliveries are ready before the loop starts; the
        // cancelled token must still win.
        let deliveries = stream::iter(vec![
            Ok::<_, DomainError>(FakeDelivery::new(payload.clone(), &settled)),
            Ok(FakeDelivery::new(payload, &settled)),
        ]);

        let mut sink = RecordingSink::new();
        consume_loop(deliveries, &session, &mut sink, &token, "test").await;

        assert!(sink.received.is_empty());
        assert!(settled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn loop_settles_each_delivery_until_the_stream_ends() {
        let session = PushSession::new();
        let token = session.cancellation_token();

        let settled = Arc::new(Mutex::new(Vec::new()));
        let payload = serde_json::to_vec(&sample_event()).unwrap();
        let deliveries = stream::iter(vec![
            Ok::<_, DomainError>(FakeDelivery::new(payload, &settled)),
            Ok(FakeDelivery::new(&b"{not json"[..], &settled)),
        ]);

        let mut sink = RecordingSink::new();
        consume_loop(deliveries, &session, &mut sink, &token, "test").await;

        // The valid event reached the client, the malformed one was
        // dropped, and both were acked exactly once.
        assert_eq!(sink.received.len(), 1);
        assert_eq!(*settled.lock().unwrap(), vec![Settle::Ack, Settle::Ack]);
    }

    #[tokio::test]
    async fn loop_stops_on_a_stream_error() {
        let session = PushSession::new();
        let token = session.cancellation_token();

        let settled = Arc::new(Mutex::new(Vec::new()));
        let payload = serde_json::to_vec(&sample_event()).unwrap();
        let deliveries = stream::iter(vec![
            Ok(FakeDelivery::new(payload, &settled)),
            Err(DomainError::broker("connection reset")),
        ]);

        let mut sink = RecordingSink::new();
        consume_loop(deliveries, &session, &mut sink, &token, "test").await;

        assert_eq!(sink.received.len(), 1);
        assert_eq!(*settled.lock().unwrap(), vec![Settle::Ack]);
    }

    #[tokio::test]
    async fn forward_failure_does_not_stop_subsequent_deliveries() {
        let session = PushSession::new();
        let mut sink = RecordingSink::failing(DomainError::internal("broken pipe"));
        let payload = serde_json::to_vec(&sample_event()).unwrap();

        let outcome = relay(&payload, &session, &mut sink).await;
        assert!(matches!(outcome, DeliveryOutcome::ForwardFailed(_)));
        assert_eq!(settle_for(&outcome), Settle::Ack);
    }
}
