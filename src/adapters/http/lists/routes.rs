//! Routes for the list endpoints.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::application::ListService;

use super::handlers::{create_list, delete_list, get_list, get_lists, update_list};

/// Creates the `/lists` router.
pub fn list_routes(service: Arc<ListService>) -> Router {
    Router::new()
        .route("/lists", post(create_list).get(get_lists))
        .route(
            "/lists/:list_id",
            get(get_list).patch(update_list).delete(delete_list),
        )
        .with_state(service)
}
