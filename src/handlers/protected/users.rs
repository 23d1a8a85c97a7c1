use axum::{
    extract::State,
    http::StatusCode,
};

use crate::database::models::{Request, User};
use crate::dto::{UserSaveDto, UserUpdateDto, UserUpdateRoleDto};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult, AuthUser, RequireAdmin};
use crate::pagination::{PageModel, PageParams};
use crate::state::AppState;

/// POST /users - create a user (administrators only)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiJson(dto): ApiJson<UserSaveDto>,
) -> ApiResult<User> {
    let user = state.users.save(dto).await?;
    Ok(ApiResponse::created(user))
}

/// PUT /users/:id - update name, email or password of the caller's own account
pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<UserUpdateDto>,
) -> ApiResult<User> {
    state.access.ensure_owner(&caller, id).await?;
    let user = state.users.update(id, dto).await?;
    Ok(ApiResponse::success(user))
}

/// GET /users/:id
pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<User> {
    Ok(ApiResponse::success(state.users.get_by_id(id).await?))
}

/// GET /users?page=&size=
pub async fn list(State(state): State<AppState>, ApiQuery(params): ApiQuery<PageParams>) -> ApiResult<PageModel<User>> {
    let page = state.page_request(params)?;
    Ok(ApiResponse::success(state.users.list_all(&page).await?))
}

/// GET /users/:id/requests?page=&size= - requests owned by user `id`
pub async fn requests(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<PageModel<Request>> {
    let page = state.page_request(params)?;
    Ok(ApiResponse::success(state.requests.list_all_by_owner_id(id, &page).await?))
}

/// PATCH /users/role/:id - change a user's role (administrators only)
///
/// Answers 200 with an empty body.
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<UserUpdateRoleDto>,
) -> Result<StatusCode, ApiError> {
    state.users.update_role(id, dto.role).await?;
    Ok(StatusCode::OK)
}
