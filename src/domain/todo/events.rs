//! Change-notification events emitted when a todo is mutated or deleted.
//!
//! A `TodoEvent` is built by the mutation path immediately after the
//! database change commits, serialized to JSON, and published to the
//! durable notification queue. Connected push clients receive the same
//! JSON verbatim, so the serialized shape is part of the public API:
//!
//! ```json
//! {"todo_id":42,"content":"buy milk","priority":"high",
//!  "completed":true,"list_id":1,"user_id":"...","action":"updated"}
//! ```
//!
//! Deletion events carry only `{"todo_id":7,"action":"deleted"}`.

use serde::{Deserialize, Serialize};

use super::{Priority, TodoItem};

/// What happened to the todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoAction {
    Updated,
    Deleted,
}

/// The serialized description of a task mutation or deletion.
///
/// Immutable once built; it has no lifecycle beyond the queued message
/// it becomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoEvent {
    pub todo_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub action: TodoAction,
}

impl TodoEvent {
    /// Builds an update event carrying the todo's identifying and
    /// display fields.
    pub fn updated(todo: &TodoItem) -> Self {
        Self {
            todo_id: todo.id,
            content: Some(todo.content.clone()),
            priority: Some(todo.priority),
            completed: Some(todo.completed),
            list_id: Some(todo.list_id),
            user_id: Some(todo.user_id.to_string()),
            action: TodoAction::Updated,
        }
    }

    /// Builds a deletion event. Only the id survives the delete, so
    /// nothing else is carried.
    pub fn deleted(todo_id: i64) -> Self {
        Self {
            todo_id,
            content: None,
            priority: None,
            completed: None,
            list_id: None,
            user_id: None,
            action: TodoAction::Deleted,
        }
    }
}
