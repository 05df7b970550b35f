use axum::extract::{Extension, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::{not_blank, ApiPath, ValidatedJson};
use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CommentResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CommentSaveRequest {
    #[validate(custom(function = "not_blank", message = "contents is required"))]
    pub contents: String,
}

/// POST /todos/:todo_id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(todo_id): ApiPath<Uuid>,
    ValidatedJson(body): ValidatedJson<CommentSaveRequest>,
) -> ApiResult<CommentResponse> {
    let comment = state.comments.save_comment(&user, todo_id, &body.contents).await?;
    Ok(ApiResponse::created(comment))
}

/// GET /todos/:todo_id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    ApiPath(todo_id): ApiPath<Uuid>,
) -> ApiResult<Vec<CommentResponse>> {
    Ok(ApiResponse::success(state.comments.get_comments(todo_id).await?))
}
