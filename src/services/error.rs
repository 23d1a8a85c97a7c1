use crate::auth::password::PasswordHashError;
use crate::database::manager::DatabaseError;
use crate::dto::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Password hashing failed")]
    PasswordHash,

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) | DatabaseError::MissingReference(msg) => {
                ServiceError::NotFound(format!("Not found: {}", msg))
            }
            DatabaseError::Conflict(msg) => ServiceError::Conflict(msg),
            other => ServiceError::Database(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<PasswordHashError> for ServiceError {
    fn from(_: PasswordHashError) -> Self {
        ServiceError::PasswordHash
    }
}
