use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Declined,
    Interview,
}

impl JobStatus {
    pub const ALL: &'static [&'static str] = &["pending", "declined", "interview"];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Declined => "declined",
            JobStatus::Interview => "interview",
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "declined" => Ok(JobStatus::Declined),
            "interview" => Ok(JobStatus::Interview),
            other => Err(StoreError::Validation(vec![format!(
                "`{}` is not a valid enum value for path `status`",
                other
            )])),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The replaceable part of a job; create and update both write all of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFields {
    pub company: String,
    pub position: String,
    pub status: Option<JobStatus>,
}

impl JobFields {
    pub fn check(&self) -> Result<(), StoreError> {
        let mut errors = Vec::new();
        if self.company.is_empty() {
            errors.push("Please provide company name".to_string());
        }
        if self.position.is_empty() {
            errors.push("Please provide job position".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(errors))
        }
    }
}

/// Row shape as read from postgres; `status` is TEXT there
#[derive(Debug, FromRow)]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub status: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .as_deref()
            .map(str::parse::<JobStatus>)
            .transpose()
            .map_err(|_| StoreError::Corrupt(format!("job {} has an unknown status", row.id)))?;

        Ok(Job {
            id: row.id,
            company: row.company,
            position: row.position,
            status,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
