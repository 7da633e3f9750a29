//! HTTP DTOs for the list endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::todos::dto::TodoResponse;
use crate::application::ListWithTodos;
use crate::ports::{ListChanges, NewList};

/// Request to create a list.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateListRequest> for NewList {
    fn from(req: CreateListRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
        }
    }
}

/// Partial update for a list.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateListRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateListRequest> for ListChanges {
    fn from(req: UpdateListRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
        }
    }
}

/// Public list representation, including its todos.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub todos: Vec<TodoResponse>,
}

impl From<ListWithTodos> for ListResponse {
    fn from(with_todos: ListWithTodos) -> Self {
        Self {
            id: with_todos.list.id,
            title: with_todos.list.title,
            description: with_todos.list.description,
            todos: with_todos
                .todos
                .into_iter()
                .map(TodoResponse::from)
                .collect(),
        }
    }
}

/// List representation without todos, used where they were not loaded.
#[derive(Debug, Clone, Serialize)]
pub struct ListSummaryResponse {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<crate::domain::list::TodoList> for ListSummaryResponse {
    fn from(list: crate::domain::list::TodoList) -> Self {
        Self {
            id: list.id,
            title: list.title,
            description: list.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_tolerates_missing_description() {
        let req: CreateListRequest = serde_json::from_str(r#"{"title":"groceries"}"#).unwrap();
        assert_eq!(req.title, "groceries");
        assert!(req.description.is_none());
    }
}
