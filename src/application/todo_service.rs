//! Todo service - ownership-scoped todo operations plus the
//! change-notification hook.
//!
//! Mutations notify *after* the row change has committed, never before.
//! A publish failure is logged and swallowed: the HTTP mutation already
//! succeeded, and losing a best-effort notification is preferred over
//! failing or delaying the request.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::todo::{TodoEvent, TodoItem};
use crate::ports::{
    ChangeNotifier, ListRepository, NewTodo, TodoChanges, TodoFilter, TodoRepository,
};

/// Application service for todos.
pub struct TodoService {
    todos: Arc<dyn TodoRepository>,
    lists: Arc<dyn ListRepository>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl TodoService {
    pub fn new(
        todos: Arc<dyn TodoRepository>,
        lists: Arc<dyn ListRepository>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            todos,
            lists,
            notifier,
        }
    }

    /// Creates a todo inside one of the user's lists.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        todo: NewTodo,
    ) -> Result<TodoItem, DomainError> {
        if todo.content.trim().is_empty() {
            return Err(DomainError::validation("Todo content must not be empty"));
        }
        self.lists
            .find_by_id(todo.list_id, user.id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("TodoList with id {} not found", todo.list_id))
            })?;

        self.todos.insert(user.id, todo).await
    }

    /// Fetches one todo.
    pub async fn get(
        &self,
        user: &AuthenticatedUser,
        todo_id: i64,
    ) -> Result<TodoItem, DomainError> {
        self.todos
            .find_by_id(todo_id, user.id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("TodoItem with id {} not found", todo_id)))
    }

    /// Fetches todos matching the filter.
    pub async fn get_all(
        &self,
        user: &AuthenticatedUser,
        filter: &TodoFilter,
    ) -> Result<Vec<TodoItem>, DomainError> {
        self.todos.find_all(user.id, filter).await
    }

    /// Applies a partial update, then publishes one `updated` event.
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        todo_id: i64,
        changes: TodoChanges,
    ) -> Result<TodoItem, DomainError> {
        let updated = self
            .todos
            .update(todo_id, user.id, changes)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("TodoItem with id {} not found", todo_id))
            })?;

        self.notify_change(TodoEvent::updated(&updated)).await;
        Ok(updated)
    }

    /// Deletes a todo, then publishes one `deleted` event.
    pub async fn delete(&self, user: &AuthenticatedUser, todo_id: i64) -> Result<(), DomainError> {
        let deleted = self.todos.delete(todo_id, user.id).await?;
        if !deleted {
            return Err(DomainError::not_found(format!(
                "TodoItem with id {} not found",
                todo_id
            )));
        }

        self.notify_change(TodoEvent::deleted(todo_id)).await;
        Ok(())
    }

    /// Best-effort publish: failures are observable in the logs but do
    /// not affect the mutation's outcome.
    async fn notify_change(&self, event: TodoEvent) {
        if let Err(e) = self.notifier.notify(event).await {
            tracing::error!("Change notification not published: {}", e);
        }
    }
}
