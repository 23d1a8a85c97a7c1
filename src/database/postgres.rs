use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    NewRequest, NewRequestFile, NewRequestStage, NewUser, Request, RequestFile, RequestStage, User,
};
use crate::database::repository::{
    HealthCheck, RequestFileRepository, RequestRepository, RequestStageRepository, UserRepository,
};
use crate::pagination::{PageRequest, PageSlice};
use crate::types::Role;

const USER_COLUMNS: &str = "id, name, email, password, role, created_at";
const REQUEST_COLUMNS: &str = "id, subject, description, state, creation_date, owner_id";
const STAGE_COLUMNS: &str = "id, description, state, realization_date, request_id, owner_id";
const FILE_COLUMNS: &str = "id, name, location, request_id";

/// sqlx-backed implementation of every repository trait
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a `SELECT ... ORDER BY id LIMIT/OFFSET` plus its `COUNT(*)`.
    /// `filter` is an optional `column = $1` predicate and the value bound to it.
    async fn select_page<T>(
        &self,
        table: &str,
        columns: &str,
        filter: Option<(&str, i64)>,
        page: &PageRequest,
    ) -> Result<PageSlice<T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let (items, total) = match filter {
            Some((column, value)) => {
                let select = format!(
                    "SELECT {} FROM {} WHERE {} = $1 ORDER BY id LIMIT $2 OFFSET $3",
                    columns, table, column
                );
                let count = format!("SELECT COUNT(*) FROM {} WHERE {} = $1", table, column);

                let items = sqlx::query_as::<_, T>(&select)
                    .bind(value)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await?;
                let (total,): (i64,) = sqlx::query_as(&count).bind(value).fetch_one(&self.pool).await?;
                (items, total)
            }
            None => {
                let select = format!("SELECT {} FROM {} ORDER BY id LIMIT $1 OFFSET $2", columns, table);
                let count = format!("SELECT COUNT(*) FROM {}", table);

                let items = sqlx::query_as::<_, T>(&select)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await?;
                let (total,): (i64,) = sqlx::query_as(&count).fetch_one(&self.pool).await?;
                (items, total)
            }
        };

        Ok(PageSlice {
            items,
            total: u64::try_from(total).unwrap_or(0),
        })
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match DatabaseError::from(e) {
                DatabaseError::Conflict(_) => {
                    DatabaseError::Conflict(format!("email '{}' is already registered", user.email))
                }
                other => other,
            })?;
        Ok(row)
    }

    async fn update(&self, user: &User) -> Result<User, DatabaseError> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3, password = $4 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match DatabaseError::from(e) {
                DatabaseError::Conflict(_) => {
                    DatabaseError::Conflict(format!("email '{}' is already registered", user.email))
                }
                other => other,
            })?
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user.id)))
    }

    async fn update_role(&self, id: i64, role: Role) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).bind(email).fetch_optional(&self.pool).await?)
    }

    async fn find_all(&self, page: &PageRequest) -> Result<PageSlice<User>, DatabaseError> {
        self.select_page("users", USER_COLUMNS, None, page).await
    }
}

#[async_trait]
impl RequestRepository for PgStore {
    async fn insert(&self, request: NewRequest) -> Result<Request, DatabaseError> {
        let sql = format!(
            "INSERT INTO requests (subject, description, state, creation_date, owner_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            REQUEST_COLUMNS
        );
        Ok(sqlx::query_as::<_, Request>(&sql)
            .bind(&request.subject)
            .bind(&request.description)
            .bind(request.state.as_str())
            .bind(request.creation_date)
            .bind(request.owner_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, request: &Request) -> Result<Request, DatabaseError> {
        let sql = format!(
            "UPDATE requests SET subject = $2, description = $3, state = $4 WHERE id = $1 RETURNING {}",
            REQUEST_COLUMNS
        );
        sqlx::query_as::<_, Request>(&sql)
            .bind(request.id)
            .bind(&request.subject)
            .bind(&request.description)
            .bind(request.state.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("request {}", request.id)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Request>, DatabaseError> {
        let sql = format!("SELECT {} FROM requests WHERE id = $1", REQUEST_COLUMNS);
        Ok(sqlx::query_as::<_, Request>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn find_all(&self, page: &PageRequest) -> Result<PageSlice<Request>, DatabaseError> {
        self.select_page("requests", REQUEST_COLUMNS, None, page).await
    }

    async fn find_all_by_owner_id(
        &self,
        owner_id: i64,
        page: &PageRequest,
    ) -> Result<PageSlice<Request>, DatabaseError> {
        self.select_page("requests", REQUEST_COLUMNS, Some(("owner_id", owner_id)), page)
            .await
    }
}

#[async_trait]
impl RequestStageRepository for PgStore {
    async fn insert(&self, stage: NewRequestStage) -> Result<RequestStage, DatabaseError> {
        let sql = format!(
            "INSERT INTO request_stages (description, state, realization_date, request_id, owner_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            STAGE_COLUMNS
        );
        Ok(sqlx::query_as::<_, RequestStage>(&sql)
            .bind(&stage.description)
            .bind(stage.state.as_str())
            .bind(stage.realization_date)
            .bind(stage.request_id)
            .bind(stage.owner_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<RequestStage>, DatabaseError> {
        let sql = format!("SELECT {} FROM request_stages WHERE id = $1", STAGE_COLUMNS);
        Ok(sqlx::query_as::<_, RequestStage>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn find_all_by_request_id(
        &self,
        request_id: i64,
        page: &PageRequest,
    ) -> Result<PageSlice<RequestStage>, DatabaseError> {
        self.select_page("request_stages", STAGE_COLUMNS, Some(("request_id", request_id)), page)
            .await
    }
}

#[async_trait]
impl RequestFileRepository for PgStore {
    async fn insert(&self, file: NewRequestFile) -> Result<RequestFile, DatabaseError> {
        let sql = format!(
            "INSERT INTO request_files (name, location, request_id) VALUES ($1, $2, $3) RETURNING {}",
            FILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, RequestFile>(&sql)
            .bind(&file.name)
            .bind(&file.location)
            .bind(file.request_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_all_by_request_id(
        &self,
        request_id: i64,
        page: &PageRequest,
    ) -> Result<PageSlice<RequestFile>, DatabaseError> {
        self.select_page("request_files", FILE_COLUMNS, Some(("request_id", request_id)), page)
            .await
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
