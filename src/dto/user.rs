use serde::Deserialize;

use super::{Validate, ValidationErrors, NAME_MAX};
use crate::types::Role;

/// Body of `POST /users`
#[derive(Debug, Clone, Deserialize)]
pub struct UserSaveDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Validate for UserSaveDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_text("name", &self.name, NAME_MAX);
        errors.check_email("email", &self.email);
        errors.check_password("password", &self.password);
        errors.into_result()
    }
}

/// Body of `PUT /users/:id`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdateDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for UserUpdateDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.check_text("name", name, NAME_MAX);
        }
        if let Some(email) = &self.email {
            errors.check_email("email", email);
        }
        if let Some(password) = &self.password {
            errors.check_password("password", password);
        }
        errors.into_result()
    }
}

/// Body of `POST /users/login`
#[derive(Debug, Clone, Deserialize)]
pub struct UserLoginDto {
    pub email: String,
    pub password: String,
}

impl Validate for UserLoginDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.email.trim().is_empty() {
            errors.add("email", "must not be blank");
        }
        if self.password.is_empty() {
            errors.add("password", "must not be blank");
        }
        errors.into_result()
    }
}

/// Body of `PATCH /users/role/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdateRoleDto {
    pub role: Role,
}

impl Validate for UserUpdateRoleDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
