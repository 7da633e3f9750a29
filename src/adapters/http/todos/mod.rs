//! Todo endpoints - CRUD plus change-event publication on mutations.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::todo_routes;
