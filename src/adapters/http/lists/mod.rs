//! List endpoints - CRUD over a user's todo lists.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::list_routes;
