use std::sync::Arc;
use tracing::info;

use crate::auth::{AccessManager, JwtError, JwtManager};
use crate::config::{AppConfig, StorageBackend};
use crate::database::{DatabaseManager, HealthCheck, Repositories};
use crate::error::ApiError;
use crate::pagination::{PageParams, PageRequest};
use crate::services::{RequestFileService, RequestService, RequestStageService, UserService};

/// Everything a handler needs, cloned into each request
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub requests: RequestService,
    pub stages: RequestStageService,
    pub files: RequestFileService,
    pub access: AccessManager,
    pub jwt: JwtManager,
    pub health: Arc<dyn HealthCheck>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(repos: Repositories, config: AppConfig) -> Result<Self, JwtError> {
        let jwt = JwtManager::from_config(&config.security)?;

        Ok(Self {
            users: UserService::new(repos.users.clone()),
            requests: RequestService::new(repos.requests.clone()),
            stages: RequestStageService::new(repos.stages, repos.requests.clone()),
            files: RequestFileService::new(repos.files, repos.requests.clone()),
            access: AccessManager::new(repos.users, repos.requests),
            jwt,
            health: repos.health,
            config: Arc::new(config),
        })
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: AppConfig) -> Result<Self, JwtError> {
        Self::new(Repositories::in_memory(), config)
    }

    /// Open the configured store, running migrations when enabled
    pub async fn connect(config: AppConfig) -> anyhow::Result<Self> {
        let repos = match config.database.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage; data is lost on shutdown");
                Repositories::in_memory()
            }
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                if config.database.run_migrations {
                    DatabaseManager::migrate(&pool).await?;
                }
                info!(
                    url = config.redacted_database_url().as_deref().unwrap_or("<unset>"),
                    "Connected to PostgreSQL"
                );
                Repositories::postgres(pool)
            }
        };

        Ok(Self::new(repos, config)?)
    }

    /// Validate `?page=&size=` against the configured bounds
    pub fn page_request(&self, params: PageParams) -> Result<PageRequest, ApiError> {
        PageRequest::from_params(params, &self.config.pagination)
    }
}
