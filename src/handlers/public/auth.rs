use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::{not_blank, ValidatedJson};
use crate::database::models::UserRole;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "password is required"))]
    pub password: String,
    #[validate(custom(function = "not_blank", message = "nickname is required"))]
    pub nickname: String,
    #[serde(default)]
    pub user_role: Option<UserRole>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub bearer_token: String,
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SignupRequest>,
) -> ApiResult<TokenResponse> {
    let role = body.user_role.unwrap_or(UserRole::User);
    let bearer_token = state
        .auth
        .signup(&body.email, &body.password, &body.nickname, role)
        .await?;
    Ok(ApiResponse::created(TokenResponse { bearer_token }))
}

/// POST /auth/signin
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SigninRequest>,
) -> ApiResult<TokenResponse> {
    let bearer_token = state.auth.signin(&body.email, &body.password).await?;
    Ok(ApiResponse::success(TokenResponse { bearer_token }))
}
