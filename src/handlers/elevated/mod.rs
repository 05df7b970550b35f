// handlers/elevated/mod.rs - Administrative handlers
//
// Security Level: JWT + ADMIN role
// Middleware: jwt_auth_middleware, then require_admin_middleware, which also
// writes the admin_access log line for every request, admitted or not.

pub mod admin;
