use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser, JsonBody};
use crate::state::AppState;

use super::{job_fields, JobResponse, JobsResponse, JOB};

/// GET /api/v1/jobs - every job owned by the caller, oldest first
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> ApiResult<JobsResponse> {
    let jobs = state.store.find_jobs(user.user_id).await?;
    Ok(ApiResponse::success(JobsResponse { jobs }))
}

/// POST /api/v1/jobs - create a job owned by the caller
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(body): JsonBody,
) -> ApiResult<JobResponse> {
    let fields = job_fields(JOB.check(&body).finish()?)?;
    let job = state.store.create_job(user.user_id, fields).await?;
    tracing::debug!("User {} created job {}", user.user_id, job.id);

    Ok(ApiResponse::created(JobResponse {
        job,
        message: Some("Successfully created job"),
    }))
}
