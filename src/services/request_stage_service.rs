use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::database::models::{NewRequestStage, RequestStage};
use crate::database::repository::{RequestRepository, RequestStageRepository};
use crate::dto::{RequestStageSaveDto, Validate};
use crate::pagination::{PageModel, PageRequest};

use super::ServiceError;

#[derive(Clone)]
pub struct RequestStageService {
    stages: Arc<dyn RequestStageRepository>,
    requests: Arc<dyn RequestRepository>,
}

impl RequestStageService {
    pub fn new(stages: Arc<dyn RequestStageRepository>, requests: Arc<dyn RequestRepository>) -> Self {
        Self { stages, requests }
    }

    /// Append a stage to an existing request, recorded by `owner_id`
    pub async fn save(&self, owner_id: i64, dto: RequestStageSaveDto) -> Result<RequestStage, ServiceError> {
        dto.validate()?;

        if self.requests.find_by_id(dto.request_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("Request {} not found", dto.request_id)));
        }

        let stage = self
            .stages
            .insert(NewRequestStage {
                description: dto.description,
                state: dto.state,
                realization_date: Utc::now(),
                request_id: dto.request_id,
                owner_id,
            })
            .await?;

        info!(stage_id = stage.id, request_id = stage.request_id, state = %stage.state, "Request stage recorded");
        Ok(stage)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<RequestStage, ServiceError> {
        self.stages
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Request stage {} not found", id)))
    }

    pub async fn list_all_by_request_id(
        &self,
        request_id: i64,
        page: &PageRequest,
    ) -> Result<PageModel<RequestStage>, ServiceError> {
        let slice = self.stages.find_all_by_request_id(request_id, page).await?;
        Ok(PageModel::new(page, slice))
    }
}
