//! HTTP handlers for the list endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::domain_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::ListService;

use super::dto::{CreateListRequest, ListResponse, ListSummaryResponse, UpdateListRequest};

/// POST /lists - create a list.
pub async fn create_list(
    State(service): State<Arc<ListService>>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateListRequest>,
) -> Response {
    match service.create(&user, req.into()).await {
        Ok(list) => (StatusCode::CREATED, Json(ListSummaryResponse::from(list))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /lists - all of the user's lists with their todos.
pub async fn get_lists(
    State(service): State<Arc<ListService>>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match service.get_all(&user).await {
        Ok(lists) => Json(
            lists
                .into_iter()
                .map(ListResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /lists/:list_id - one list with its todos.
pub async fn get_list(
    State(service): State<Arc<ListService>>,
    RequireAuth(user): RequireAuth,
    Path(list_id): Path<i64>,
) -> Response {
    match service.get(&user, list_id).await {
        Ok(list) => Json(ListResponse::from(list)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// PATCH /lists/:list_id - partial update.
pub async fn update_list(
    State(service): State<Arc<ListService>>,
    RequireAuth(user): RequireAuth,
    Path(list_id): Path<i64>,
    Json(req): Json<UpdateListRequest>,
) -> Response {
    match service.update(&user, list_id, req.into()).await {
        Ok(list) => Json(ListSummaryResponse::from(list)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /lists/:list_id - delete a list and its todos.
pub async fn delete_list(
    State(service): State<Arc<ListService>>,
    RequireAuth(user): RequireAuth,
    Path(list_id): Path<i64>,
) -> Response {
    match service.delete(&user, list_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
