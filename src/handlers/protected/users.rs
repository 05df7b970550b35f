use axum::extract::{Extension, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::{not_blank, ApiPath, ValidatedJson};
use crate::auth::AuthUser;
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(custom(function = "not_blank", message = "old_password is required"))]
    pub old_password: String,
    #[validate(custom(function = "not_blank", message = "new_password is required"))]
    pub new_password: String,
}

/// GET /users/:user_id
pub async fn get_user(State(state): State<AppState>, ApiPath(user_id): ApiPath<Uuid>) -> ApiResult<User> {
    Ok(ApiResponse::success(state.users.get_user(user_id).await?))
}

/// PUT /users - change the caller's own password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<()> {
    state
        .users
        .change_password(user.id, &body.old_password, &body.new_password)
        .await?;
    Ok(ApiResponse::no_content())
}
