use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::middleware::authenticate;
use crate::state::AppState;

pub const AUTH_ROUTE: &str = "/api/v1/auth";
pub const JOB_ROUTE: &str = "/api/v1/jobs";

/// Build the full router. Shared by `main` and the integration tests.
pub fn app(state: AppState, api: &ApiConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::status::root))
        .route("/health", get(handlers::status::health))
        .merge(auth_routes())
        // Protected
        .merge(job_routes(state.clone()))
        // Must follow every route it applies to
        .method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes))
        .with_state(state);

    if api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn auth_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route(&format!("{}/register", AUTH_ROUTE), post(auth::register_post))
        .route(&format!("{}/login", AUTH_ROUTE), post(auth::login_post))
}

fn job_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::jobs;

    Router::new()
        .route(JOB_ROUTE, get(jobs::jobs_list).post(jobs::jobs_create))
        .route(
            &format!("{}/:id", JOB_ROUTE),
            get(jobs::job_get).patch(jobs::job_update).delete(jobs::job_delete),
        )
        // route_layer: only matched routes are gated, unknown paths still 404
        .route_layer(from_fn_with_state(state, authenticate))
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
