use serde::Deserialize;

use super::{Validate, ValidationErrors};

const LOCATION_MAX: usize = 2048;
const FILE_NAME_MAX: usize = 255;

/// Body of `POST /requests/:id/files`
#[derive(Debug, Clone, Deserialize)]
pub struct RequestFileSaveDto {
    pub name: String,
    pub location: String,
}

impl Validate for RequestFileSaveDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_text("name", &self.name, FILE_NAME_MAX);
        errors.check_text("location", &self.location, LOCATION_MAX);
        errors.into_result()
    }
}
