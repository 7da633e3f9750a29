//! PostgreSQL implementation of TodoRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::todo::TodoItem;
use crate::ports::{NewTodo, StatusFilter, TodoChanges, TodoFilter, TodoOrder, TodoRepository};

/// PostgreSQL implementation of TodoRepository.
#[derive(Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Todo query failed: {}", e))
}

fn row_to_todo(row: &PgRow) -> Result<TodoItem, DomainError> {
    let priority: String = row.try_get("priority").map_err(db_err)?;
    Ok(TodoItem {
        id: row.try_get("id").map_err(db_err)?,
        content: row.try_get("content").map_err(db_err)?,
        priority: priority.parse()?,
        completed: row.try_get("completed").map_err(db_err)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
        list_id: row.try_get("list_id").map_err(db_err)?,
        user_id: row.try_get("user_id").map_err(db_err)?,
    })
}

const TODO_COLUMNS: &str = "id, content, priority, completed, created_at, list_id, user_id";

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn insert(&self, user_id: Uuid, todo: NewTodo) -> Result<TodoItem, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO todos (content, priority, completed, list_id, user_id)
            VALUES ($1, $2, FALSE, $3, $4)
            RETURNING id, content, priority, completed, created_at, list_id, user_id
            "#,
        )
        .bind(&todo.content)
        .bind(todo.priority.as_str())
        .bind(todo.list_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row_to_todo(&row)
    }

    async fn find_by_id(
        &self,
        todo_id: i64,
        user_id: Uuid,
    ) -> Result<Option<TodoItem>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, content, priority, completed, created_at, list_id, user_id
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(todo_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_todo).transpose()
    }

    async fn find_all(
        &self,
        user_id: Uuid,
        filter: &TodoFilter,
    ) -> Result<Vec<TodoItem>, DomainError> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {} FROM todos WHERE user_id = ",
            TODO_COLUMNS
        ));
        query.push_bind(user_id);

        if let Some(list_id) = filter.list_id {
            query.push(" AND list_id = ").push_bind(list_id);
        }
        if let Some(status) = filter.status {
            query
                .push(" AND completed = ")
                .push_bind(status == StatusFilter::Finished);
        }
        if let Some(search) = &filter.search {
            query
                .push(" AND content ILIKE ")
                .push_bind(format!("%{}%", search));
        }

        // Priority sorts by rank, not alphabetically.
        match filter.order_by {
            Some(TodoOrder::CreatedAtAsc) => {
                query.push(" ORDER BY created_at ASC");
            }
            Some(TodoOrder::CreatedAtDesc) => {
                query.push(" ORDER BY created_at DESC");
            }
            Some(TodoOrder::PriorityAsc) => {
                query.push(
                    " ORDER BY CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END ASC",
                );
            }
            Some(TodoOrder::PriorityDesc) => {
                query.push(
                    " ORDER BY CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END DESC",
                );
            }
            None => {
                query.push(" ORDER BY id ASC");
            }
        }

        let rows = query.build().fetch_all(&self.pool).await.map_err(db_err)?;
        rows.iter().map(row_to_todo).collect()
    }

    async fn update(
        &self,
        todo_id: i64,
        user_id: Uuid,
        changes: TodoChanges,
    ) -> Result<Option<TodoItem>, DomainError> {
        if changes.is_empty() {
            return Err(DomainError::validation("No fields to update"));
        }

        let row = sqlx::query(
            r#"
            UPDATE todos SET
                content = COALESCE($3, content),
                priority = COALESCE($4, priority),
                completed = COALESCE($5, completed)
            WHERE id = $1 AND user_id = $2
            RETURNING id, content, priority, completed, created_at, list_id, user_id
            "#,
        )
        .bind(todo_id)
        .bind(user_id)
        .bind(changes.content)
        .bind(changes.priority.map(|p| p.as_str()))
        .bind(changes.completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_todo).transpose()
    }

    async fn delete(&self, todo_id: i64, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(todo_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }
}
