use serde::Deserialize;

use super::{Validate, ValidationErrors};
use crate::types::RequestState;

/// Body of `POST /request-stages`
#[derive(Debug, Clone, Deserialize)]
pub struct RequestStageSaveDto {
    pub request_id: i64,
    pub description: Option<String>,
    pub state: RequestState,
}

impl Validate for RequestStageSaveDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.request_id <= 0 {
            errors.add("request_id", "must be a positive id");
        }
        errors.into_result()
    }
}
