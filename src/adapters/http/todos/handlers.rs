//! HTTP handlers for the todo endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::domain_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::TodoService;
use crate::ports::TodoFilter;

use super::dto::{CreateTodoRequest, TodoQuery, TodoResponse, UpdateTodoRequest};

/// POST /lists/:list_id/todos - create a todo in a list.
pub async fn create_todo(
    State(service): State<Arc<TodoService>>,
    RequireAuth(user): RequireAuth,
    Path(list_id): Path<i64>,
    Json(req): Json<CreateTodoRequest>,
) -> Response {
    match service.create(&user, req.into_new_todo(list_id)).await {
        Ok(todo) => (StatusCode::CREATED, Json(TodoResponse::from(todo))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /lists/:list_id/todos - todos belonging to one list.
pub async fn todos_in_list(
    State(service): State<Arc<TodoService>>,
    RequireAuth(user): RequireAuth,
    Path(list_id): Path<i64>,
    Query(query): Query<TodoQuery>,
) -> Response {
    let filter = match query.into_filter() {
        Ok(filter) => TodoFilter {
            list_id: Some(list_id),
            ..filter
        },
        Err(e) => return domain_error_response(e),
    };
    list_with_filter(&service, &user, filter).await
}

/// GET /todos - all of the user's todos, optionally filtered.
pub async fn list_todos(
    State(service): State<Arc<TodoService>>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<TodoQuery>,
) -> Response {
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(e) => return domain_error_response(e),
    };
    list_with_filter(&service, &user, filter).await
}

/// GET /todos/:todo_id - one todo.
pub async fn get_todo(
    State(service): State<Arc<TodoService>>,
    RequireAuth(user): RequireAuth,
    Path(todo_id): Path<i64>,
) -> Response {
    match service.get(&user, todo_id).await {
        Ok(todo) => Json(TodoResponse::from(todo)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// PATCH /todos/:todo_id - partial update; publishes a change event.
pub async fn update_todo(
    State(service): State<Arc<TodoService>>,
    RequireAuth(user): RequireAuth,
    Path(todo_id): Path<i64>,
    Json(req): Json<UpdateTodoRequest>,
) -> Response {
    match service.update(&user, todo_id, req.into()).await {
        Ok(todo) => Json(TodoResponse::from(todo)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /todos/:todo_id - delete; publishes a deletion event.
pub async fn delete_todo(
    State(service): State<Arc<TodoService>>,
    RequireAuth(user): RequireAuth,
    Path(todo_id): Path<i64>,
) -> Response {
    match service.delete(&user, todo_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn list_with_filter(
    service: &TodoService,
    user: &crate::domain::foundation::AuthenticatedUser,
    filter: TodoFilter,
) -> Response {
    match service.get_all(user, &filter).await {
        Ok(todos) => Json(
            todos
                .into_iter()
                .map(TodoResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => domain_error_response(e),
    }
}
