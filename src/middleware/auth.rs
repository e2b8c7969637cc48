use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from the bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub name: String,
}

impl From<Identity> for CurrentUser {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            name: identity.name,
        }
    }
}

/// Bearer token gate for every protected route.
///
/// Missing header or missing `Bearer ` prefix is `MissingToken`; a token that
/// does not verify is `InvalidToken`. On success the identity is attached to
/// the request for the `CurrentUser` extractor.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers()).ok_or_else(|| {
        tracing::debug!("Rejected request to {} without bearer token", request.uri().path());
        ApiError::MissingToken
    })?;

    let identity = state.tokens.verify(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ApiError::InvalidToken
    })?;

    request.extensions_mut().insert(CurrentUser::from(identity));

    Ok(next.run(request).await)
}

/// Token after the `Bearer ` prefix, if the header has that shape
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    header.strip_prefix("Bearer ")
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::MissingToken)
    }
}
