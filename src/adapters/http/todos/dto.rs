//! HTTP DTOs for the todo endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;
use crate::domain::todo::{Priority, TodoItem};
use crate::ports::{NewTodo, TodoChanges, TodoFilter};

/// Request to create a todo inside a list.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
}

impl CreateTodoRequest {
    pub fn into_new_todo(self, list_id: i64) -> NewTodo {
        NewTodo {
            content: self.content,
            priority: self.priority,
            list_id,
        }
    }
}

/// Partial update for a todo. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoRequest {
    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            content: req.content,
            priority: req.priority,
            completed: req.completed,
        }
    }
}

/// Query parameters for listing todos.
///
/// `status` and `order_by` arrive as strings and are parsed into their
/// typed forms; an unknown value is a 400, not a silent default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoQuery {
    pub list_id: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub order_by: Option<String>,
}

impl TodoQuery {
    pub fn into_filter(self) -> Result<TodoFilter, DomainError> {
        Ok(TodoFilter {
            list_id: self.list_id,
            status: self.status.as_deref().map(str::parse).transpose()?,
            search: self.search,
            order_by: self.order_by.as_deref().map(str::parse).transpose()?,
        })
    }
}

/// Public todo representation.
#[derive(Debug, Clone, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub content: String,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub list_id: i64,
}

impl From<TodoItem> for TodoResponse {
    fn from(todo: TodoItem) -> Self {
        Self {
            id: todo.id,
            content: todo.content,
            priority: todo.priority,
            completed: todo.completed,
            created_at: todo.created_at,
            list_id: todo.list_id,
        }
    }
}
