use axum::extract::State;

use crate::database::models::RequestFile;
use crate::dto::RequestFileSaveDto;
use crate::middleware::{ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult, AuthUser};
use crate::pagination::{PageModel, PageParams};
use crate::state::AppState;

/// POST /requests/:id/files - attach a file reference (request owner only)
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(request_id): ApiPath<i64>,
    ApiJson(dto): ApiJson<RequestFileSaveDto>,
) -> ApiResult<RequestFile> {
    state.access.ensure_request_owner(&caller, request_id).await?;
    let file = state.files.save(request_id, dto).await?;
    Ok(ApiResponse::created(file))
}

/// GET /requests/:id/files?page=&size=
pub async fn list(
    State(state): State<AppState>,
    ApiPath(request_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<PageModel<RequestFile>> {
    let page = state.page_request(params)?;
    Ok(ApiResponse::success(state.files.list_all_by_request_id(request_id, &page).await?))
}
