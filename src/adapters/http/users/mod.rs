//! Auth endpoints - registration, login, current user.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;
