//! Shared error-to-response mapping for the REST handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error body: `{"error": "...", "code": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, code: &ErrorCode) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }
}

/// Maps a `DomainError` to its HTTP response.
///
/// Database and internal errors keep their detail in the logs and
/// return a generic message.
pub fn domain_error_response(error: DomainError) -> Response {
    let code = error.code();
    let (status, body) = match code {
        ErrorCode::NotFound => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error.message(), &code),
        ),
        ErrorCode::AlreadyExists => (
            StatusCode::CONFLICT,
            ErrorResponse::new(error.message(), &code),
        ),
        ErrorCode::ValidationFailed => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error.message(), &code),
        ),
        ErrorCode::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error.message(), &code),
        ),
        _ => {
            tracing::error!("Request failed: {}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("An unexpected error occurred", &code),
            )
        }
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = domain_error_response(DomainError::not_found("TodoItem with id 7 not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn already_exists_maps_to_409() {
        let response = domain_error_response(DomainError::already_exists("taken"));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = domain_error_response(DomainError::validation("bad input"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response = domain_error_response(DomainError::unauthorized("nope"));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn database_errors_are_opaque_500s() {
        let response = domain_error_response(DomainError::database("connection reset"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
