use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::StoreError;

/// Stored account. `password` is always a bcrypt hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    /// Store-level required-field rules, reported together
    pub fn check(&self) -> Result<(), StoreError> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push("Please provide name".to_string());
        }
        if self.username.is_empty() {
            errors.push("Please provide username".to_string());
        }
        if self.password_hash.is_empty() {
            errors.push("Please provide password".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(errors))
        }
    }
}
