use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::RequestState;

/// Append-only history entry of a request
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequestStage {
    pub id: i64,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub state: RequestState,
    pub realization_date: DateTime<Utc>,
    pub request_id: i64,
    pub owner_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewRequestStage {
    pub description: Option<String>,
    pub state: RequestState,
    pub realization_date: DateTime<Utc>,
    pub request_id: i64,
    pub owner_id: i64,
}
