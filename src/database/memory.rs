//! Process-local store implementing every repository trait.
//!
//! Mirrors the PostgreSQL schema constraints that the services rely on:
//! unique user emails, and owner/request references that must exist.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewRequest, NewRequestFile, NewRequestStage, NewUser, Request, RequestFile, RequestStage, User,
};
use crate::database::repository::{
    HealthCheck, RequestFileRepository, RequestRepository, RequestStageRepository, UserRepository,
};
use crate::pagination::{PageRequest, PageSlice};
use crate::types::Role;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    requests: BTreeMap<i64, Request>,
    stages: BTreeMap<i64, RequestStage>,
    files: BTreeMap<i64, RequestFile>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Slice an id-ordered iterator into one page
fn paginate<'a, T, I>(rows: I, page: &PageRequest) -> PageSlice<T>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a T> + Clone,
{
    let total = rows.clone().count() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    PageSlice {
        items: rows.skip(offset).take(limit).cloned().collect(),
        total,
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(DatabaseError::Conflict(format!("email '{}' is already registered", user.email)));
        }

        let id = tables.next_id();
        let row = User {
            id,
            name: user.name,
            email: user.email,
            password: user.password,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, user: &User) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(DatabaseError::Conflict(format!("email '{}' is already registered", user.email)));
        }

        let stored = tables
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user.id)))?;
        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.password = user.password.clone();
        Ok(stored.clone())
    }

    async fn update_role(&self, id: i64, role: Role) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&id) {
            Some(user) => {
                user.role = role;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<PageSlice<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.users.values(), page))
    }
}

#[async_trait]
impl RequestRepository for MemoryStore {
    async fn insert(&self, request: NewRequest) -> Result<Request, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&request.owner_id) {
            return Err(DatabaseError::MissingReference(format!("user {}", request.owner_id)));
        }

        let id = tables.next_id();
        let row = Request {
            id,
            subject: request.subject,
            description: request.description,
            state: request.state,
            creation_date: request.creation_date,
            owner_id: request.owner_id,
        };
        tables.requests.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, request: &Request) -> Result<Request, DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .requests
            .get_mut(&request.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("request {}", request.id)))?;
        stored.subject = request.subject.clone();
        stored.description = request.description.clone();
        stored.state = request.state;
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Request>, DatabaseError> {
        Ok(self.tables.read().await.requests.get(&id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<PageSlice<Request>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.requests.values(), page))
    }

    async fn find_all_by_owner_id(
        &self,
        owner_id: i64,
        page: &PageRequest,
    ) -> Result<PageSlice<Request>, DatabaseError> {
        let tables = self.tables.read().await;
        let owned = tables.requests.values().filter(|r| r.owner_id == owner_id);
        Ok(paginate(owned, page))
    }
}

#[async_trait]
impl RequestStageRepository for MemoryStore {
    async fn insert(&self, stage: NewRequestStage) -> Result<RequestStage, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.requests.contains_key(&stage.request_id) {
            return Err(DatabaseError::MissingReference(format!("request {}", stage.request_id)));
        }
        if !tables.users.contains_key(&stage.owner_id) {
            return Err(DatabaseError::MissingReference(format!("user {}", stage.owner_id)));
        }

        let id = tables.next_id();
        let row = RequestStage {
            id,
            description: stage.description,
            state: stage.state,
            realization_date: stage.realization_date,
            request_id: stage.request_id,
            owner_id: stage.owner_id,
        };
        tables.stages.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<RequestStage>, DatabaseError> {
        Ok(self.tables.read().await.stages.get(&id).cloned())
    }

    async fn find_all_by_request_id(
        &self,
        request_id: i64,
        page: &PageRequest,
    ) -> Result<PageSlice<RequestStage>, DatabaseError> {
        let tables = self.tables.read().await;
        let stages = tables.stages.values().filter(|s| s.request_id == request_id);
        Ok(paginate(stages, page))
    }
}

#[async_trait]
impl RequestFileRepository for MemoryStore {
    async fn insert(&self, file: NewRequestFile) -> Result<RequestFile, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.requests.contains_key(&file.request_id) {
            return Err(DatabaseError::MissingReference(format!("request {}", file.request_id)));
        }

        let id = tables.next_id();
        let row = RequestFile {
            id,
            name: file.name,
            location: file.location,
            request_id: file.request_id,
        };
        tables.files.insert(id, row.clone());
        Ok(row)
    }

    async fn find_all_by_request_id(
        &self,
        request_id: i64,
        page: &PageRequest,
    ) -> Result<PageSlice<RequestFile>, DatabaseError> {
        let tables = self.tables.read().await;
        let files = tables.files.values().filter(|f| f.request_id == request_id);
        Ok(paginate(files, page))
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
