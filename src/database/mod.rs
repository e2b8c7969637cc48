//! Persistence for users and jobs.
//!
//! Handlers only see the `Store` trait. Every job read or write takes the
//! owner id alongside the job id so ownership scoping cannot be skipped.

use async_trait::async_trait;
use uuid::Uuid;

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{Job, JobFields, JobStatus, NewUser, User};
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Fails with `StoreError::Duplicate` when the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_jobs(&self, owner: Uuid) -> Result<Vec<Job>, StoreError>;

    /// `id` is the raw path segment; a non-UUID yields `StoreError::InvalidId`.
    async fn find_job(&self, id: &str, owner: Uuid) -> Result<Option<Job>, StoreError>;

    async fn create_job(&self, owner: Uuid, fields: JobFields) -> Result<Job, StoreError>;

    /// Atomic find-and-replace; `None` when no job matches both id and owner.
    async fn update_job(&self, id: &str, owner: Uuid, fields: JobFields) -> Result<Option<Job>, StoreError>;

    /// Atomic find-and-remove; returns the removed job.
    async fn delete_job(&self, id: &str, owner: Uuid) -> Result<Option<Job>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    async fn close(&self);
}

/// Parse a client supplied identifier the way every backend must
pub fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("1"), Err(StoreError::InvalidId(raw)) if raw == "1"));
    }
}
