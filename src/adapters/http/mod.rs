//! HTTP adapters - REST API surface.
//!
//! Each resource has its own dto/handlers/routes trio; the middleware
//! and error mapping are shared.

pub mod error;
pub mod lists;
pub mod middleware;
pub mod todos;
pub mod users;

pub use lists::list_routes;
pub use todos::todo_routes;
pub use users::auth_routes;
