//! HTTP handlers for the auth endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::domain_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{Registration, UserService};

use super::dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};

/// POST /auth/register - create an account.
pub async fn register(
    State(service): State<Arc<UserService>>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let registration = Registration {
        username: req.username,
        email: req.email,
        full_name: req.full_name,
        password: req.password,
    };

    match service.register(registration).await {
        Ok(user) => (StatusCode::CREATED, Json(UserResponse::from(user))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /auth/login - exchange credentials for a bearer token.
pub async fn login(
    State(service): State<Arc<UserService>>,
    Json(req): Json<LoginRequest>,
) -> Response {
    match service.login(&req.username, &req.password).await {
        Ok(token) => Json(TokenResponse::from(token)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /auth/me - the account behind the presented token.
pub async fn me(RequireAuth(user): RequireAuth) -> Response {
    Json(UserResponse::from(user)).into_response()
}
