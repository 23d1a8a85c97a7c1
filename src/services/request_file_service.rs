use std::sync::Arc;
use tracing::info;

use crate::database::models::{NewRequestFile, RequestFile};
use crate::database::repository::{RequestFileRepository, RequestRepository};
use crate::dto::{RequestFileSaveDto, Validate};
use crate::pagination::{PageModel, PageRequest};

use super::ServiceError;

#[derive(Clone)]
pub struct RequestFileService {
    files: Arc<dyn RequestFileRepository>,
    requests: Arc<dyn RequestRepository>,
}

impl RequestFileService {
    pub fn new(files: Arc<dyn RequestFileRepository>, requests: Arc<dyn RequestRepository>) -> Self {
        Self { files, requests }
    }

    /// Attach file metadata to request `request_id`
    pub async fn save(&self, request_id: i64, dto: RequestFileSaveDto) -> Result<RequestFile, ServiceError> {
        dto.validate()?;

        if self.requests.find_by_id(request_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("Request {} not found", request_id)));
        }

        let file = self
            .files
            .insert(NewRequestFile {
                name: dto.name.trim().to_string(),
                location: dto.location.trim().to_string(),
                request_id,
            })
            .await?;

        info!(file_id = file.id, request_id, "Request file attached");
        Ok(file)
    }

    pub async fn list_all_by_request_id(
        &self,
        request_id: i64,
        page: &PageRequest,
    ) -> Result<PageModel<RequestFile>, ServiceError> {
        let slice = self.files.find_all_by_request_id(request_id, page).await?;
        Ok(PageModel::new(page, slice))
    }
}
