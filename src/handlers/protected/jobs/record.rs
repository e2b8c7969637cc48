use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, JsonBody};
use crate::state::AppState;

use super::{job_fields, JobResponse, MessageResponse, JOB};

// A job owned by someone else is reported exactly like a missing one.

/// GET /api/v1/jobs/:id
pub async fn get(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<JobResponse> {
    let job = state
        .store
        .find_job(&id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::job_not_found(&id))?;

    Ok(ApiResponse::success(JobResponse { job, message: None }))
}

/// PATCH /api/v1/jobs/:id - replace company, position and status together
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<JobResponse> {
    let fields = job_fields(JOB.check(&body).finish()?)?;
    let job = state
        .store
        .update_job(&id, user.user_id, fields)
        .await?
        .ok_or_else(|| ApiError::job_not_found(&id))?;

    Ok(ApiResponse::success(JobResponse {
        job,
        message: Some("Successfully updated job"),
    }))
}

/// DELETE /api/v1/jobs/:id - permanent
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let job = state
        .store
        .delete_job(&id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::job_not_found(&id))?;
    tracing::debug!("User {} deleted job {}", user.user_id, job.id);

    Ok(ApiResponse::success(MessageResponse {
        message: "Successfully deleted job",
    }))
}
