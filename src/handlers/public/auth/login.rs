// handlers/public/auth/login.rs - POST /api/v1/auth/login handler

use axum::extract::State;
use once_cell::sync::Lazy;

use crate::auth::compare_password;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;
use crate::validation::{Field, Rule, Schema};

use super::TokenResponse;

static LOGIN: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::new("username", "Please enter username")
            .rule(Rule::NotEmpty)
            .rule(Rule::Email("Please provide a valid email")),
        Field::new("password", "Please enter password").rule(Rule::NotEmpty),
    ])
});

/// POST /api/v1/auth/login - Authenticate and receive a token
///
/// Input: `{"username", "password"}`
/// Output (200): `{"token"}`
///
/// Unknown username and wrong password produce the same 401 so the
/// response never reveals whether an account exists.
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<TokenResponse> {
    let mut form = LOGIN.check(&body).finish()?;
    let username = form.take("username");

    let Some(user) = state.store.find_user_by_username(&username).await? else {
        tracing::info!("Login failed: unknown username");
        return Err(ApiError::InvalidCredentials);
    };

    if !compare_password(&form.take("password"), &user.password).await? {
        tracing::info!("Login failed: wrong password for user {}", user.id);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id, &user.name)?;
    tracing::debug!("User {} logged in", user.id);

    Ok(ApiResponse::success(TokenResponse {
        token,
        message: None,
    }))
}
