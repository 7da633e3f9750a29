//! PostgreSQL implementation of ListRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::list::TodoList;
use crate::ports::{ListChanges, ListRepository, NewList};

/// PostgreSQL implementation of ListRepository.
#[derive(Clone)]
pub struct PostgresListRepository {
    pool: PgPool,
}

impl PostgresListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("List query failed: {}", e))
}

fn row_to_list(row: &PgRow) -> Result<TodoList, DomainError> {
    Ok(TodoList {
        id: row.try_get("id").map_err(db_err)?,
        title: row.try_get("title").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        user_id: row.try_get("user_id").map_err(db_err)?,
    })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl ListRepository for PostgresListRepository {
    async fn insert(&self, user_id: Uuid, list: NewList) -> Result<TodoList, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO lists (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, user_id
            "#,
        )
        .bind(&list.title)
        .bind(&list.description)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::already_exists(format!(
                    "Todo list with title '{}' already exists",
                    list.title
                ))
            } else {
                db_err(e)
            }
        })?;

        row_to_list(&row)
    }

    async fn find_by_id(
        &self,
        list_id: i64,
        user_id: Uuid,
    ) -> Result<Option<TodoList>, DomainError> {
        let row = sqlx::query(
            "SELECT id, title, description, user_id FROM lists WHERE id = $1 AND user_id = $2",
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_list).transpose()
    }

    async fn find_all(&self, user_id: Uuid) -> Result<Vec<TodoList>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, title, description, user_id FROM lists WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_list).collect()
    }

    async fn update(
        &self,
        list_id: i64,
        user_id: Uuid,
        changes: ListChanges,
    ) -> Result<Option<TodoList>, DomainError> {
        if changes.is_empty() {
            return Err(DomainError::validation("No fields to update"));
        }

        let row = sqlx::query(
            r#"
            UPDATE lists SET
                title = COALESCE($3, title),
                description = COALESCE($4, description)
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, user_id
            "#,
        )
        .bind(list_id)
        .bind(user_id)
        .bind(changes.title)
        .bind(changes.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::already_exists("A list with that title already exists")
            } else {
                db_err(e)
            }
        })?;

        row.as_ref().map(row_to_list).transpose()
    }

    async fn delete(&self, list_id: i64, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }
}
