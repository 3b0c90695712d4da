//!
//! # Storage Collaborators
//!
//! Traits for the two stores the service depends on: the principal registry
//! (users keyed by email) and the task store. Two backends implement them:
//! [`postgres`] for production over an `sqlx::PgPool`, and [`memory`] for
//! running without a database and for tests.
//!
//! Both registries enforce identity uniqueness at insert time, which is what
//! closes the check-then-insert race in registration.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Principal, Task};

pub use memory::{MemoryPrincipalRegistry, MemoryTaskStore};
pub use postgres::{PgPrincipalRegistry, PgTaskStore};

/// Failures reported by a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,
    /// A principal with this identity is already stored.
    #[error("identity already registered")]
    DuplicateIdentity,
    /// A principal was offered with an empty credential hash.
    #[error("credential hash must not be empty")]
    EmptyCredential,
    /// Any other storage fault (connectivity, constraint, decoding).
    #[error("database error: {0}")]
    Database(String),
}

/// Converts `sqlx::Error` into `StoreError`.
///
/// Unique-constraint violations become `DuplicateIdentity`; the only unique
/// constraint in the schema is the principal primary key. Likewise the only
/// check constraint is the non-empty `password_hash`.
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateIdentity
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                StoreError::EmptyCredential
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// Resolves and persists principals.
#[async_trait]
pub trait PrincipalRegistry: Send + Sync {
    /// Looks up a principal by email. `Ok(None)` means "not registered".
    async fn find_by_identity(&self, email: &str) -> Result<Option<Principal>, StoreError>;

    /// Inserts a new principal, failing with `DuplicateIdentity` if the email
    /// is already taken.
    async fn create(&self, principal: Principal) -> Result<Principal, StoreError>;
}

/// Persists tasks. Ownership is not checked here; see `TaskService`.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Task>, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    async fn create(&self, task: Task) -> Result<Task, StoreError>;

    /// Marks the task completed and returns the updated record.
    async fn mark_complete(&self, id: Uuid) -> Result<Task, StoreError>;

    /// Removes the task and returns the record as it was before removal.
    async fn delete(&self, id: Uuid) -> Result<Task, StoreError>;
}
