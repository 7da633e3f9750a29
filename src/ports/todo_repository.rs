//! TodoRepository port - persistence interface for todo items.
//!
//! All operations are ownership-scoped: a caller only ever sees rows
//! belonging to the given user.

use std::str::FromStr;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::todo::{Priority, TodoItem};

/// Fields for a new todo item.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub content: String,
    pub priority: Priority,
    pub list_id: i64,
}

/// Partial update for an existing todo. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    /// True when no field is set; repositories reject such updates.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.priority.is_none() && self.completed.is_none()
    }
}

/// Completion filter used by todo queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Finished,
    Unfinished,
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "finished" => Ok(StatusFilter::Finished),
            "unfinished" => Ok(StatusFilter::Unfinished),
            other => Err(DomainError::validation(format!(
                "Unknown status filter '{}'",
                other
            ))),
        }
    }
}

/// Sort order for todo queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoOrder {
    CreatedAtAsc,
    CreatedAtDesc,
    PriorityAsc,
    PriorityDesc,
}

impl FromStr for TodoOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at asc" => Ok(TodoOrder::CreatedAtAsc),
            "created_at desc" => Ok(TodoOrder::CreatedAtDesc),
            "priority asc" => Ok(TodoOrder::PriorityAsc),
            "priority desc" => Ok(TodoOrder::PriorityDesc),
            other => Err(DomainError::validation(format!(
                "Unknown order_by '{}'",
                other
            ))),
        }
    }
}

/// Filter and ordering options for listing todos.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub list_id: Option<i64>,
    pub status: Option<StatusFilter>,
    /// Case-insensitive substring match on content.
    pub search: Option<String>,
    pub order_by: Option<TodoOrder>,
}

/// Port for todo persistence.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Inserts a new todo owned by `user_id`.
    async fn insert(&self, user_id: Uuid, todo: NewTodo) -> Result<TodoItem, DomainError>;

    /// Fetches one todo by id, scoped to its owner.
    async fn find_by_id(&self, todo_id: i64, user_id: Uuid)
        -> Result<Option<TodoItem>, DomainError>;

    /// Fetches all todos for a user, honoring the filter.
    async fn find_all(&self, user_id: Uuid, filter: &TodoFilter)
        -> Result<Vec<TodoItem>, DomainError>;

    /// Applies a partial update and returns the updated row, or `None`
    /// when the todo does not exist or belongs to someone else.
    async fn update(
        &self,
        todo_id: i64,
        user_id: Uuid,
        changes: TodoChanges,
    ) -> Result<Option<TodoItem>, DomainError>;

    /// Deletes a todo. Returns `false` when nothing was deleted.
    async fn delete(&self, todo_id: i64, user_id: Uuid) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_parses_both_variants() {
        assert_eq!("finished".parse::<StatusFilter>().unwrap(), StatusFilter::Finished);
        assert_eq!(
            "unfinished".parse::<StatusFilter>().unwrap(),
            StatusFilter::Unfinished
        );
        assert!("done".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn order_parses_all_variants() {
        assert_eq!(
            "created_at desc".parse::<TodoOrder>().unwrap(),
            TodoOrder::CreatedAtDesc
        );
        assert_eq!(
            "priority asc".parse::<TodoOrder>().unwrap(),
            TodoOrder::PriorityAsc
        );
        assert!("id desc".parse::<TodoOrder>().is_err());
    }

    #[test]
    fn empty_changes_detected() {
        assert!(TodoChanges::default().is_empty());
        assert!(!TodoChanges {
            completed: Some(true),
            ..Default::default()
        }
        .is_empty());
    }
}
