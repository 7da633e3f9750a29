//! WebSocket adapters - push sessions, their registry, and the endpoint.

mod handler;
mod registry;
mod session;

pub use handler::{notification_router, NotificationState, WsEventSink};
pub use registry::PushRegistry;
pub use session::{ClientId, PushSession};
