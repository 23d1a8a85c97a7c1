use axum::extract::State;
use serde::Deserialize;

use crate::database::models::RequestStage;
use crate::dto::RequestStageSaveDto;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiQuery, ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StageQuery {
    pub id: Option<i64>,
}

/// POST /request-stages - record a stage on a request, owned by the caller
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(dto): ApiJson<RequestStageSaveDto>,
) -> ApiResult<RequestStage> {
    let owner_id = state.access.caller_id(&caller).await?;
    let stage = state.stages.save(owner_id, dto).await?;
    Ok(ApiResponse::created(stage))
}

/// GET /request-stages?id=
pub async fn show(State(state): State<AppState>, ApiQuery(query): ApiQuery<StageQuery>) -> ApiResult<RequestStage> {
    let id = query
        .id
        .ok_or_else(|| ApiError::bad_request("Query parameter 'id' is required"))?;
    Ok(ApiResponse::success(state.stages.get_by_id(id).await?))
}
