//! Ownership predicates evaluated before mutating handlers run.

use std::sync::Arc;
use tracing::warn;

use crate::database::models::User;
use crate::database::repository::{RequestRepository, UserRepository};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::ServiceError;
use crate::types::Role;

#[derive(Clone)]
pub struct AccessManager {
    users: Arc<dyn UserRepository>,
    requests: Arc<dyn RequestRepository>,
}

impl AccessManager {
    pub fn new(users: Arc<dyn UserRepository>, requests: Arc<dyn RequestRepository>) -> Self {
        Self { users, requests }
    }

    /// Stored user behind the token, if it still exists under the same email.
    /// A token issued before an email change no longer resolves.
    pub async fn current_user(&self, caller: &AuthUser) -> Result<Option<User>, ServiceError> {
        Ok(self
            .users
            .find_by_id(caller.id)
            .await?
            .filter(|user| user.email == caller.email))
    }

    /// Id of the stored user behind the token; a deleted account is unauthorized
    pub async fn caller_id(&self, caller: &AuthUser) -> Result<i64, ApiError> {
        match self.current_user(caller).await? {
            Some(user) => Ok(user.id),
            None => {
                warn!(caller = %caller.email, "Token subject has no matching user");
                Err(ApiError::unauthorized("Authenticated user no longer exists"))
            }
        }
    }

    /// True iff the caller is user `id`
    pub async fn is_owner(&self, caller: &AuthUser, id: i64) -> Result<bool, ServiceError> {
        Ok(self
            .current_user(caller)
            .await?
            .is_some_and(|user| user.id == id))
    }

    /// True iff the caller owns request `id`. Unknown requests are a not-found error.
    pub async fn is_request_owner(&self, caller: &AuthUser, id: i64) -> Result<bool, ServiceError> {
        let request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Request {} not found", id)))?;

        Ok(self
            .current_user(caller)
            .await?
            .is_some_and(|user| user.id == request.owner_id))
    }

    /// Checks the stored role, not the token's `roles` claim
    pub async fn ensure_admin(&self, caller: &AuthUser) -> Result<User, ApiError> {
        match self.current_user(caller).await? {
            Some(user) if user.role == Role::Administrator => Ok(user),
            Some(_) => {
                warn!(caller = %caller.email, "Access denied: administrator role required");
                Err(ApiError::forbidden("Administrator role required"))
            }
            None => {
                warn!(caller = %caller.email, "Token subject has no matching user");
                Err(ApiError::unauthorized("Authenticated user no longer exists"))
            }
        }
    }

    pub async fn ensure_owner(&self, caller: &AuthUser, id: i64) -> Result<(), ApiError> {
        if self.is_owner(caller, id).await? {
            Ok(())
        } else {
            warn!(caller = %caller.email, user_id = id, "Access denied: not the account owner");
            Err(ApiError::forbidden("Only the account owner may modify this user"))
        }
    }

    pub async fn ensure_request_owner(&self, caller: &AuthUser, id: i64) -> Result<(), ApiError> {
        if self.is_request_owner(caller, id).await? {
            Ok(())
        } else {
            warn!(caller = %caller.email, request_id = id, "Access denied: not the request owner");
            Err(ApiError::forbidden("Only the request owner may modify this request"))
        }
    }
}
