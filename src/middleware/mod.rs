pub mod auth;
pub mod body;
pub mod response;

pub use auth::{authenticate, CurrentUser};
pub use body::JsonBody;
pub use response::{ApiResponse, ApiResult};
