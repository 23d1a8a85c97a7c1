use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metadata of a file attached to a request; the bytes live at `location`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequestFile {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub request_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewRequestFile {
    pub name: String,
    pub location: String,
    pub request_id: i64,
}
