use std::time::Instant;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::auth::AuthUser;
use crate::error::ApiError;

/// Admits only ADMIN callers and writes one `admin_access` record per request.
///
/// Must run after `jwt_auth_middleware`, which provides the `AuthUser`.
pub async fn require_admin_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let Some(user) = request.extensions().get::<AuthUser>().cloned() else {
        return ApiError::unauthorized("Authentication required").into_response();
    };

    let response = if user.is_admin() {
        next.run(request).await
    } else {
        ApiError::forbidden("Administrator role required").into_response()
    };

    if crate::config::config().security.enable_audit_logging {
        tracing::info!(
            target: "admin_access",
            user_id = %user.id,
            role = %user.role,
            method = %method,
            uri = %uri,
            at = %Utc::now().to_rfc3339(),
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "admin request"
        );
    }

    response
}
