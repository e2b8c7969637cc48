// handlers/public/auth/mod.rs - Registration and login

use serde::Serialize;

pub mod login; // POST /api/v1/auth/login - exchange credentials for a token
pub mod register; // POST /api/v1/auth/register - create account, get a token

pub use login::login_post;
pub use register::register_post;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}
