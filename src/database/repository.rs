//! Storage seams, one trait per entity.
//!
//! Services hold these as `Arc<dyn ...>` so the PostgreSQL and in-memory
//! backends are interchangeable. Paginated finders return rows ordered by
//! id ascending, which is insertion order for both backends.

use async_trait::async_trait;
use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewRequest, NewRequestFile, NewRequestStage, NewUser, Request, RequestFile, RequestStage, User,
};
use crate::pagination::{PageRequest, PageSlice};
use crate::types::Role;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. Duplicate email yields `DatabaseError::Conflict`.
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError>;

    /// Overwrite name, email and password of an existing user.
    async fn update(&self, user: &User) -> Result<User, DatabaseError>;

    /// Returns the number of rows touched (0 when the id is unknown).
    async fn update_role(&self, id: i64, role: Role) -> Result<u64, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_all(&self, page: &PageRequest) -> Result<PageSlice<User>, DatabaseError>;
}

#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Insert a request. Unknown owner yields `DatabaseError::MissingReference`.
    async fn insert(&self, request: NewRequest) -> Result<Request, DatabaseError>;

    /// Overwrite subject, description and state of an existing request.
    async fn update(&self, request: &Request) -> Result<Request, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Request>, DatabaseError>;

    async fn find_all(&self, page: &PageRequest) -> Result<PageSlice<Request>, DatabaseError>;

    async fn find_all_by_owner_id(
        &self,
        owner_id: i64,
        page: &PageRequest,
    ) -> Result<PageSlice<Request>, DatabaseError>;
}

#[async_trait]
pub trait RequestStageRepository: Send + Sync {
    async fn insert(&self, stage: NewRequestStage) -> Result<RequestStage, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<RequestStage>, DatabaseError>;

    async fn find_all_by_request_id(
        &self,
        request_id: i64,
        page: &PageRequest,
    ) -> Result<PageSlice<RequestStage>, DatabaseError>;
}

#[async_trait]
pub trait RequestFileRepository: Send + Sync {
    async fn insert(&self, file: NewRequestFile) -> Result<RequestFile, DatabaseError>;

    async fn find_all_by_request_id(
        &self,
        request_id: i64,
        page: &PageRequest,
    ) -> Result<PageSlice<RequestFile>, DatabaseError>;
}

/// Liveness probe for whichever backend is in use
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// The full set of repositories handed to the services
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub requests: Arc<dyn RequestRepository>,
    pub stages: Arc<dyn RequestStageRepository>,
    pub files: Arc<dyn RequestFileRepository>,
    pub health: Arc<dyn HealthCheck>,
}

impl Repositories {
    /// Repositories backed by a PostgreSQL pool
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        let store = Arc::new(crate::database::postgres::PgStore::new(pool));
        Self {
            users: store.clone(),
            requests: store.clone(),
            stages: store.clone(),
            files: store.clone(),
            health: store,
        }
    }

    /// Repositories backed by process memory
    pub fn in_memory() -> Self {
        let store = Arc::new(crate::database::memory::MemoryStore::new());
        Self {
            users: store.clone(),
            requests: store.clone(),
            stages: store.clone(),
            files: store.clone(),
            health: store,
        }
    }
}
