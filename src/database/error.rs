use thiserror::Error;

/// Failures reported by any `Store` backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Required-field or format rules enforced by the store itself, one message per field
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Identifier that cannot name any record (not a UUID)
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Duplicate value for field '{field}'")]
    Duplicate { field: String },

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // 23505 = unique_violation
            if db_err.code().as_deref() == Some("23505") {
                let field = db_err
                    .constraint()
                    .map(field_from_constraint)
                    .unwrap_or_else(|| "unknown".to_string());
                return StoreError::Duplicate { field };
            }
            // 23503 = foreign_key_violation, only reachable through jobs.created_by
            if db_err.code().as_deref() == Some("23503") {
                return StoreError::Validation(vec!["Please provide user".to_string()]);
            }
        }
        StoreError::Sqlx(err)
    }
}

/// Postgres names unique constraints `<table>_<column>_key`
pub(crate) fn field_from_constraint(constraint: &str) -> String {
    let trimmed = constraint.strip_suffix("_key").unwrap_or(constraint);
    match trimmed.split_once('_') {
        Some((_table, column)) if !column.is_empty() => column.to_string(),
        _ => trimmed.to_string(),
    }
}
