use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::database::models::{NewRequest, Request};
use crate::database::repository::RequestRepository;
use crate::dto::{RequestSaveDto, RequestUpdateDto, Validate};
use crate::pagination::{PageModel, PageRequest};
use crate::types::RequestState;

use super::ServiceError;

#[derive(Clone)]
pub struct RequestService {
    requests: Arc<dyn RequestRepository>,
}

impl RequestService {
    pub fn new(requests: Arc<dyn RequestRepository>) -> Self {
        Self { requests }
    }

    /// Open a new request owned by `owner_id`
    pub async fn save(&self, owner_id: i64, dto: RequestSaveDto) -> Result<Request, ServiceError> {
        dto.validate()?;

        let request = self
            .requests
            .insert(NewRequest {
                subject: dto.subject.trim().to_string(),
                description: dto.description,
                state: RequestState::Open,
                creation_date: Utc::now(),
                owner_id,
            })
            .await?;

        info!(request_id = request.id, owner_id, "Request opened");
        Ok(request)
    }

    /// Merge the present fields of `dto` into request `id`. The owner never changes.
    pub async fn update(&self, id: i64, dto: RequestUpdateDto) -> Result<Request, ServiceError> {
        dto.validate()?;

        let mut request = self.get_by_id(id).await?;
        if let Some(subject) = dto.subject {
            request.subject = subject.trim().to_string();
        }
        if let Some(description) = dto.description {
            request.description = Some(description);
        }
        if let Some(state) = dto.state {
            request.state = state;
        }

        let updated = self.requests.update(&request).await?;
        info!(request_id = updated.id, state = %updated.state, "Request updated");
        Ok(updated)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Request, ServiceError> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Request {} not found", id)))
    }

    pub async fn list_all(&self, page: &PageRequest) -> Result<PageModel<Request>, ServiceError> {
        let slice = self.requests.find_all(page).await?;
        Ok(PageModel::new(page, slice))
    }

    pub async fn list_all_by_owner_id(
        &self,
        owner_id: i64,
        page: &PageRequest,
    ) -> Result<PageModel<Request>, ServiceError> {
        let slice = self.requests.find_all_by_owner_id(owner_id, page).await?;
        Ok(PageModel::new(page, slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    fn save_dto(subject: &str) -> RequestSaveDto {
        RequestSaveDto {
            subject: subject.to_string(),
            description: Some("details".to_string()),
        }
    }

    #[tokio::test]
    async fn new_requests_start_open() {
        let ctx = TestContext::new();
        let owner = ctx.create_user("owner@example.com").await;

        let request = ctx.state.requests.save(owner.id, save_dto("VPN down")).await.unwrap();
        assert_eq!(request.state, RequestState::Open);
        assert_eq!(request.owner_id, owner.id);
    }

    #[tokio::test]
    async fn save_for_unknown_owner_is_not_found() {
        let ctx = TestContext::new();
        let err = ctx.state.requests.save(77, save_dto("ghost")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_merges_and_keeps_owner() {
        let ctx = TestContext::new();
        let owner = ctx.create_user("owner@example.com").await;
        let request = ctx.state.requests.save(owner.id, save_dto("VPN down")).await.unwrap();

        let dto = RequestUpdateDto {
            state: Some(RequestState::InProgress),
            ..Default::default()
        };
        let updated = ctx.state.requests.update(request.id, dto).await.unwrap();

        assert_eq!(updated.state, RequestState::InProgress);
        assert_eq!(updated.subject, "VPN down");
        assert_eq!(updated.owner_id, owner.id);
    }

    #[tokio::test]
    async fn owner_listing_only_returns_owned_requests() {
        let ctx = TestContext::new();
        let alice = ctx.create_user("alice@example.com").await;
        let bob = ctx.create_user("bob@example.com").await;
        ctx.state.requests.save(alice.id, save_dto("a1")).await.unwrap();
        ctx.state.requests.save(bob.id, save_dto("b1")).await.unwrap();
        ctx.state.requests.save(alice.id, save_dto("a2")).await.unwrap();

        let page = ctx
            .state
            .requests
            .list_all_by_owner_id(alice.id, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_elements, 2);
        assert!(page.elements.iter().all(|r| r.owner_id == alice.id));
    }
}
