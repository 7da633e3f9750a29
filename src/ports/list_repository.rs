//! ListRepository port - persistence interface for todo lists.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::list::TodoList;

/// Fields for a new list.
#[derive(Debug, Clone)]
pub struct NewList {
    pub title: String,
    pub description: Option<String>,
}

/// Partial update for an existing list.
#[derive(Debug, Clone, Default)]
pub struct ListChanges {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ListChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Port for list persistence. All operations are ownership-scoped.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Inserts a new list. Fails with `AlreadyExists` when the user
    /// already has a list with the same title.
    async fn insert(&self, user_id: Uuid, list: NewList) -> Result<TodoList, DomainError>;

    async fn find_by_id(&self, list_id: i64, user_id: Uuid)
        -> Result<Option<TodoList>, DomainError>;

    async fn find_all(&self, user_id: Uuid) -> Result<Vec<TodoList>, DomainError>;

    /// Applies a partial update; `None` when the list is not visible to
    /// the user.
    async fn update(
        &self,
        list_id: i64,
        user_id: Uuid,
        changes: ListChanges,
    ) -> Result<Option<TodoList>, DomainError>;

    /// Deletes a list and, via the schema's cascade, its todos.
    async fn delete(&self, list_id: i64, user_id: Uuid) -> Result<bool, DomainError>;
}
