use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{PrincipalRegistry, StoreError, TaskStore};
use crate::models::{Principal, Task};

/// In-process principal registry.
///
/// Insert-if-absent happens under a single write lock, giving the same
/// uniqueness guarantee as the Postgres primary key. Empty credential hashes
/// are refused as the `users` check constraint does.
#[derive(Default)]
pub struct MemoryPrincipalRegistry {
    principals: RwLock<HashMap<String, Principal>>,
}

impl MemoryPrincipalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.principals.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.read().is_empty()
    }
}

#[async_trait]
impl PrincipalRegistry for MemoryPrincipalRegistry {
    async fn find_by_identity(&self, email: &str) -> Result<Option<Principal>, StoreError> {
        Ok(self.principals.read().get(email).cloned())
    }

    async fn create(&self, principal: Principal) -> Result<Principal, StoreError> {
        if principal.password_hash.is_empty() {
            return Err(StoreError::EmptyCredential);
        }
        match self.principals.write().entry(principal.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateIdentity),
            Entry::Vacant(slot) => Ok(slot.insert(principal).clone()),
        }
    }
}

/// In-process task store.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .values()
            .filter(|task| task.owner == owner)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().get(&id).cloned())
    }

    async fn create(&self, task: Task) -> Result<Task, StoreError> {
        self.tasks.write().insert(task.id, task.clone());
        Ok(task)
    }

    async fn mark_complete(&self, id: Uuid) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write();
        let task = tasks.get_mut(&id).ok_or(StoreError::NotFound)?;
        task.is_completed = true;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<Task, StoreError> {
        self.tasks.write().remove(&id).ok_or(StoreError::NotFound)
    }
}
