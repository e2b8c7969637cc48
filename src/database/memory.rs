use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::{parse_id, Job, JobFields, NewUser, Store, StoreError, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    // Insertion order doubles as creation order
    jobs: Vec<Job>,
}

/// Process-local store for tests and `--store memory` runs.
///
/// Applies the same required-field, identifier and uniqueness rules as
/// `PgStore`, so handlers cannot tell the two apart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        user.check()?;

        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate {
                field: "username".to_string(),
            });
        }

        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            username: user.username,
            password: user.password_hash,
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_jobs(&self, owner: Uuid) -> Result<Vec<Job>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.jobs.iter().filter(|j| j.created_by == owner).cloned().collect())
    }

    async fn find_job(&self, id: &str, owner: Uuid) -> Result<Option<Job>, StoreError> {
        let id = parse_id(id)?;
        let tables = self.tables.read().await;
        Ok(tables
            .jobs
            .iter()
            .find(|j| j.id == id && j.created_by == owner)
            .cloned())
    }

    async fn create_job(&self, owner: Uuid, fields: JobFields) -> Result<Job, StoreError> {
        fields.check()?;

        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&owner) {
            return Err(StoreError::Validation(vec!["Please provide user".to_string()]));
        }

        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4(),
            company: fields.company,
            position: fields.position,
            status: fields.status,
            created_by: owner,
            created_at: now,
            updated_at: now,
        };
        tables.jobs.push(job.clone());
        Ok(job)
    }

    async fn update_job(&self, id: &str, owner: Uuid, fields: JobFields) -> Result<Option<Job>, StoreError> {
        let id = parse_id(id)?;
        fields.check()?;

        let mut tables = self.tables.write().await;
        let Some(job) = tables
            .jobs
            .iter_mut()
            .find(|j| j.id == id && j.created_by == owner)
        else {
            return Ok(None);
        };

        job.company = fields.company;
        job.position = fields.position;
        job.status = fields.status;
        job.updated_at = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn delete_job(&self, id: &str, owner: Uuid) -> Result<Option<Job>, StoreError> {
        let id = parse_id(id)?;
        let mut tables = self.tables.write().await;

        let position = tables
            .jobs
            .iter()
            .position(|j| j.id == id && j.created_by == owner);
        Ok(position.map(|index| tables.jobs.remove(index)))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}
