use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::RequestState;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Request {
    pub id: i64,
    pub subject: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub state: RequestState,
    pub creation_date: DateTime<Utc>,
    pub owner_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewRequest {
    pub subject: String,
    pub description: Option<String>,
    pub state: RequestState,
    pub creation_date: DateTime<Utc>,
    pub owner_id: i64,
}
