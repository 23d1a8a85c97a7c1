use axum::extract::State;

use crate::database::models::{Request, RequestStage};
use crate::dto::{RequestSaveDto, RequestUpdateDto};
use crate::middleware::{ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult, AuthUser};
use crate::pagination::{PageModel, PageParams};
use crate::state::AppState;

/// POST /requests - open a request owned by the caller
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(dto): ApiJson<RequestSaveDto>,
) -> ApiResult<Request> {
    let owner_id = state.access.caller_id(&caller).await?;
    let request = state.requests.save(owner_id, dto).await?;
    Ok(ApiResponse::created(request))
}

/// PUT /requests/:id - owner only
pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<RequestUpdateDto>,
) -> ApiResult<Request> {
    state.access.ensure_request_owner(&caller, id).await?;
    Ok(ApiResponse::success(state.requests.update(id, dto).await?))
}

/// GET /requests/:id
pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Request> {
    Ok(ApiResponse::success(state.requests.get_by_id(id).await?))
}

/// GET /requests?page=&size=
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<PageModel<Request>> {
    let page = state.page_request(params)?;
    Ok(ApiResponse::success(state.requests.list_all(&page).await?))
}

/// GET /requests/:id/request-stages?page=&size=
pub async fn stages(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<PageModel<RequestStage>> {
    let page = state.page_request(params)?;
    Ok(ApiResponse::success(state.stages.list_all_by_request_id(id, &page).await?))
}
