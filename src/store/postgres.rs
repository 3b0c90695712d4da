use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{PrincipalRegistry, StoreError, TaskStore};
use crate::models::{Principal, Task};

const TASK_COLUMNS: &str =
    "id, title, description, due_date, is_completed, owner, created_at, updated_at";

/// Principal registry backed by the `users` table.
///
/// `email` is the table's primary key, so concurrent registrations of the
/// same identity cannot both insert.
#[derive(Clone)]
pub struct PgPrincipalRegistry {
    pool: PgPool,
}

impl PgPrincipalRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalRegistry for PgPrincipalRegistry {
    async fn find_by_identity(&self, email: &str) -> Result<Option<Principal>, StoreError> {
        let principal = sqlx::query_as::<_, Principal>(
            "SELECT email, password_hash, name FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(principal)
    }

    async fn create(&self, principal: Principal) -> Result<Principal, StoreError> {
        let created = sqlx::query_as::<_, Principal>(
            "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, $3)
             RETURNING email, password_hash, name",
        )
        .bind(&principal.email)
        .bind(&principal.password_hash)
        .bind(&principal.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}

/// Task store backed by the `tasks` table.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner = $1 ORDER BY created_at DESC"
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    async fn create(&self, task: Task) -> Result<Task, StoreError> {
        let sql = format!(
            "INSERT INTO tasks ({TASK_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {TASK_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(task.title)
            .bind(task.description)
            .bind(task.due_date)
            .bind(task.is_completed)
            .bind(task.owner)
            .bind(task.created_at)
            .bind(task.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn mark_complete(&self, id: Uuid) -> Result<Task, StoreError> {
        let sql = format!(
            "UPDATE tasks SET is_completed = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {TASK_COLUMNS}"
        );
        // RowNotFound (task deleted in between) becomes StoreError::NotFound.
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> Result<Task, StoreError> {
        let sql = format!("DELETE FROM tasks WHERE id = $1 RETURNING {TASK_COLUMNS}");
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(task)
    }
}
