use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::{ApiPath, ValidatedJson};
use crate::database::models::UserRole;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    pub role: UserRole,
}

/// PATCH /admin/users/:user_id
pub async fn change_user_role(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ValidatedJson(body): ValidatedJson<ChangeRoleRequest>,
) -> ApiResult<()> {
    state.user_admin.change_user_role(user_id, body.role).await?;
    Ok(ApiResponse::no_content())
}

/// DELETE /admin/comments/:comment_id
pub async fn delete_comment(State(state): State<AppState>, ApiPath(comment_id): ApiPath<Uuid>) -> ApiResult<()> {
    state.comment_admin.delete_comment(comment_id).await?;
    Ok(ApiResponse::no_content())
}
