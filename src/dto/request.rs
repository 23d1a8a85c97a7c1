use serde::Deserialize;

use super::{Validate, ValidationErrors, SUBJECT_MAX};
use crate::types::RequestState;

/// Body of `POST /requests`. The owner is the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSaveDto {
    pub subject: String,
    pub description: Option<String>,
}

impl Validate for RequestSaveDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_text("subject", &self.subject, SUBJECT_MAX);
        errors.into_result()
    }
}

/// Body of `PUT /requests/:id`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestUpdateDto {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub state: Option<RequestState>,
}

impl Validate for RequestUpdateDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(subject) = &self.subject {
            errors.check_text("subject", subject, SUBJECT_MAX);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_is_required_and_bounded() {
        let blank = RequestSaveDto { subject: "".to_string(), description: None };
        assert!(blank.validate().is_err());

        let long = RequestSaveDto { subject: "x".repeat(SUBJECT_MAX + 1), description: None };
        assert!(long.validate().is_err());

        let ok = RequestSaveDto { subject: "Printer jammed".to_string(), description: None };
        assert!(ok.validate().is_ok());
    }
}
