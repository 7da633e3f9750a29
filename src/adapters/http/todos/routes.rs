//! Routes for the todo endpoints.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::application::TodoService;

use super::handlers::{
    create_todo, delete_todo, get_todo, list_todos, todos_in_list, update_todo,
};

/// Creates the todo router, including the list-nested creation and
/// listing routes.
pub fn todo_routes(service: Arc<TodoService>) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .route(
            "/todos/:todo_id",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .route(
            "/lists/:list_id/todos",
            post(create_todo).get(todos_in_list),
        )
        .with_state(service)
}
