// handlers/public/auth/register.rs - POST /api/v1/auth/register handler

use axum::extract::State;
use once_cell::sync::Lazy;

use crate::auth::hash_password;
use crate::database::NewUser;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;
use crate::validation::{Field, Rule, Schema};

use super::TokenResponse;

static REGISTER: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::new("name", "Please enter name").rule(Rule::NotEmpty),
        Field::new("username", "Please enter username")
            .rule(Rule::NotEmpty)
            .rule(Rule::Email("Please provide a valid email")),
        Field::new("password", "Please enter password")
            .rule(Rule::NotEmpty)
            .rule(Rule::MinLength(6, "Password must be at least 6 characters")),
    ])
});

/// POST /api/v1/auth/register - Create an account and receive a token
///
/// Input: `{"name", "username", "password"}`
/// Output (201): `{"token", "message": "Successfully registered user"}`
///
/// A taken username is a validation failure reported alongside any other
/// field violations, in field order.
pub async fn register_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<TokenResponse> {
    let mut checked = REGISTER.check(&body);

    if checked.is_valid("username") {
        if let Some(username) = checked.value("username") {
            if state.store.find_user_by_username(username).await?.is_some() {
                checked.reject("username", "Username already exists");
            }
        }
    }

    let mut form = checked.finish()?;
    let password_hash = hash_password(&form.take("password"), state.bcrypt_cost).await?;

    // A concurrent registration can still win the race; the store's unique
    // constraint turns that into a 400 via the error normalizer.
    let user = state
        .store
        .create_user(NewUser {
            name: form.take("name"),
            username: form.take("username"),
            password_hash,
        })
        .await?;

    let token = state.tokens.issue(user.id, &user.name)?;
    tracing::info!("Registered user {}", user.id);

    Ok(ApiResponse::created(TokenResponse {
        token,
        message: Some("Successfully registered user"),
    }))
}
