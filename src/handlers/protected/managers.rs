use axum::extract::{Extension, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::{ApiPath, ValidatedJson};
use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ManagerResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ManagerSaveRequest {
    pub user_id: Uuid,
}

/// POST /todos/:todo_id/managers
pub async fn add_manager(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(todo_id): ApiPath<Uuid>,
    ValidatedJson(body): ValidatedJson<ManagerSaveRequest>,
) -> ApiResult<ManagerResponse> {
    let manager = state.managers.save_manager(&user, todo_id, body.user_id).await?;
    Ok(ApiResponse::created(manager))
}

/// GET /todos/:todo_id/managers
pub async fn list_managers(
    State(state): State<AppState>,
    ApiPath(todo_id): ApiPath<Uuid>,
) -> ApiResult<Vec<ManagerResponse>> {
    Ok(ApiResponse::success(state.managers.get_managers(todo_id).await?))
}

/// DELETE /todos/:todo_id/managers/:manager_id
pub async fn remove_manager(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((todo_id, manager_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<()> {
    state.managers.delete_manager(&user, todo_id, manager_id).await?;
    Ok(ApiResponse::no_content())
}
