use axum::extract::{Extension, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::{not_blank, ApiPath, ApiQuery, TodoListParams, ValidatedJson};
use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{Page, TodoResponse, TodoSaveResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct TodoSaveRequest {
    #[validate(custom(function = "not_blank", message = "title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "contents is required"))]
    pub contents: String,
}

/// POST /todos
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<TodoSaveRequest>,
) -> ApiResult<TodoSaveResponse> {
    let saved = state.todos.save_todo(&user, &body.title, &body.contents).await?;
    Ok(ApiResponse::created(saved))
}

/// GET /todos?page=&size=&weather=&start=&end=
pub async fn list_todos(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TodoListParams>,
) -> ApiResult<Page<TodoResponse>> {
    let query = params.into_query()?;
    Ok(ApiResponse::success(state.todos.get_todos(&query).await?))
}

/// GET /todos/:todo_id
pub async fn get_todo(State(state): State<AppState>, ApiPath(todo_id): ApiPath<Uuid>) -> ApiResult<TodoResponse> {
    Ok(ApiResponse::success(state.todos.get_todo(todo_id).await?))
}
