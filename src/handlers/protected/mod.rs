// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Security Level: JWT Authentication Required
// Middleware: jwt_auth_middleware, which injects Extension<AuthUser>
//
// Ownership rules (who may change a todo's managers) live in the services,
// not here.

pub mod comments;
pub mod managers;
pub mod todos;
pub mod users;
