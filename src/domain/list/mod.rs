//! Todo list entity.

use serde::Serialize;
use uuid::Uuid;

/// A named list of todos owned by one user.
///
/// List titles are unique per owner; the database enforces this with a
/// composite unique constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoList {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Uuid,
}
