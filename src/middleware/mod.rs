pub mod admin;
pub mod auth;
pub mod response;

pub use admin::require_admin_middleware;
pub use auth::jwt_auth_middleware;
pub use response::{ApiResponse, ApiResult};
