pub mod auth;
pub mod extract;
pub mod json;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser, RequireAdmin};
pub use extract::{ApiPath, ApiQuery};
pub use json::ApiJson;
pub use response::{ApiResponse, ApiResult};
