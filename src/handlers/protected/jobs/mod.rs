use once_cell::sync::Lazy;
use serde::Serialize;

use crate::database::{Job, JobFields, JobStatus};
use crate::error::ApiError;
use crate::validation::{Field, Rule, Schema, Validated};

pub mod collection; // GET/POST /api/v1/jobs
pub mod record; // GET/PATCH/DELETE /api/v1/jobs/:id

pub use collection::{create as jobs_create, list as jobs_list};
pub use record::{delete as job_delete, get as job_get, update as job_update};

/// Shared by create and update; both write every field
static JOB: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::new("company", "Please provide company name").rule(Rule::NotEmpty),
        Field::new("position", "Please provide job position").rule(Rule::NotEmpty),
        Field::new("status", "Please provide job status")
            .optional()
            .rule(Rule::NotEmpty)
            .rule(Rule::OneOf(
                JobStatus::ALL,
                "Status must be one of pending, declined, interview",
            )),
    ])
});

fn job_fields(mut form: Validated) -> Result<JobFields, ApiError> {
    let status = form.get("status").map(str::parse::<JobStatus>).transpose()?;

    Ok(JobFields {
        company: form.take("company"),
        position: form.take("position"),
        status,
    })
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: Job,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_fields_from_valid_form() {
        let body = json!({ "company": " Google ", "position": "intern", "status": "interview" });
        let form = JOB.check(body.as_object().unwrap()).finish().unwrap();
        let fields = job_fields(form).unwrap();

        assert_eq!(
            fields,
            JobFields {
                company: "Google".to_string(),
                position: "intern".to_string(),
                status: Some(JobStatus::Interview),
            }
        );
    }

    #[test]
    fn reports_missing_company_and_position() {
        let body = json!({});
        let err = JOB.check(body.as_object().unwrap()).finish().unwrap_err();
        assert_eq!(err.message(), "Please provide company name, Please provide job position");
    }

    #[test]
    fn rejects_unknown_status() {
        let body = json!({ "company": "Google", "position": "intern", "status": "hired" });
        let err = JOB.check(body.as_object().unwrap()).finish().unwrap_err();
        assert_eq!(err.message(), "Status must be one of pending, declined, interview");
    }
}
