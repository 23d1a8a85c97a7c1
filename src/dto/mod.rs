//! Input shapes accepted by the API, with field-level validation.

pub mod request;
pub mod request_file;
pub mod request_stage;
pub mod user;

pub use request::{RequestSaveDto, RequestUpdateDto};
pub use request_file::RequestFileSaveDto;
pub use request_stage::RequestStageSaveDto;
pub use user::{UserLoginDto, UserSaveDto, UserUpdateDto, UserUpdateRoleDto};

use std::collections::HashMap;

/// Field name to message, reported back as `field_errors`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors(HashMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Non-blank and at most `max` characters
    pub(crate) fn check_text(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.add(field, "must not be blank");
        } else if value.chars().count() > max {
            self.add(field, format!("must be at most {} characters", max));
        }
    }

    pub(crate) fn check_email(&mut self, field: &str, value: &str) {
        self.check_text(field, value, EMAIL_MAX);
        if !looks_like_email(value.trim()) {
            self.add(field, "must be a valid email address");
        }
    }

    pub(crate) fn check_password(&mut self, field: &str, value: &str) {
        let len = value.chars().count();
        if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
            self.add(
                field,
                format!("must be between {} and {} characters", PASSWORD_MIN, PASSWORD_MAX),
            );
        }
    }
}

pub const NAME_MAX: usize = 75;
pub const EMAIL_MAX: usize = 75;
pub const SUBJECT_MAX: usize = 75;
pub const PASSWORD_MIN: usize = 7;
pub const PASSWORD_MAX: usize = 99;

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !value.chars().any(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}

/// Emails are compared case-insensitively; store them trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("ada@example.com"));
        assert!(!looks_like_email("ada.example.com"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ada@localhost"));
        assert!(!looks_like_email("ada@@example.com"));
        assert!(!looks_like_email("a da@example.com"));
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.check_email("email", "   ");
        assert_eq!(errors.get("email"), Some("must not be blank"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn normalize_email_lowercases_and_trims() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
