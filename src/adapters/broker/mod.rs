//! Broker adapters - the change-notification bridge's transport side.
//!
//! - `connection` - the process-wide connection manager
//! - `notifier` - ChangeNotifier implementation used by the mutation path
//! - `consumer` - per-client queue consumer feeding one push session

mod connection;
mod consumer;
mod notifier;

pub use connection::BrokerConnection;
pub use consumer::QueueConsumer;
pub use notifier::AmqpChangeNotifier;
