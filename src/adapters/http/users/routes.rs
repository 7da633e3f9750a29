//! Routes for the auth endpoints.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::application::UserService;

use super::handlers::{login, me, register};

/// Creates the `/auth` router.
pub fn auth_routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(service)
}
