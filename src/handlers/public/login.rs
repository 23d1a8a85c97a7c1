use axum::extract::State;
use tracing::info;

use crate::dto::UserLoginDto;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /users/login - exchange credentials for a bearer token
///
/// The response `data` is the raw token string. Its subject is the user's
/// email, `uid` is the user's id and `roles` carries the user's authority.
pub async fn login(State(state): State<AppState>, ApiJson(dto): ApiJson<UserLoginDto>) -> ApiResult<String> {
    let user = state.users.authenticate(dto).await?;
    let token = state.jwt.create_token(user.id, &user.email, vec![user.role.authority()])?;

    info!(user_id = user.id, "User logged in");
    Ok(ApiResponse::success(token))
}
