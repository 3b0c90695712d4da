use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::auth::guard::authorize_resource;
use crate::error::AppError;
use crate::models::{Task, TaskInput};
use crate::store::TaskStore;

/// Task operations on behalf of an authenticated caller.
///
/// Single-task operations fetch the task first and then check ownership, since
/// the owner is only known after the lookup. Listing is scoped to the caller
/// by the store query itself.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, caller: &str) -> Result<Vec<Task>, AppError> {
        Ok(self.store.list_by_owner(caller).await?)
    }

    pub async fn get(&self, id: Uuid, caller: &str) -> Result<Task, AppError> {
        self.fetch_owned(id, caller).await
    }

    pub async fn create(&self, input: TaskInput, caller: &str) -> Result<Task, AppError> {
        input.validate()?;
        let task = self.store.create(Task::new(input, caller)).await?;
        info!("Created task {} for {}", task.id, caller);
        Ok(task)
    }

    pub async fn complete(&self, id: Uuid, caller: &str) -> Result<Task, AppError> {
        self.fetch_owned(id, caller).await?;
        Ok(self.store.mark_complete(id).await?)
    }

    pub async fn delete(&self, id: Uuid, caller: &str) -> Result<Task, AppError> {
        self.fetch_owned(id, caller).await?;
        let task = self.store.delete(id).await?;
        info!("Deleted task {} for {}", id, caller);
        Ok(task)
    }

    async fn fetch_owned(&self, id: Uuid, caller: &str) -> Result<Task, AppError> {
        let task = self
            .store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

        authorize_resource(&task, caller).map_err(|e| {
            warn!("{} denied access to task {} owned by {}", caller, id, task.owner);
            AppError::from(e)
        })?;

        Ok(task)
    }
}
