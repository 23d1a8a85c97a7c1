use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::database::models::{NewUser, User};
use crate::database::repository::UserRepository;
use crate::dto::{normalize_email, UserLoginDto, UserSaveDto, UserUpdateDto, Validate};
use crate::pagination::{PageModel, PageRequest};
use crate::types::Role;

use super::ServiceError;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create a user with a freshly hashed password
    pub async fn save(&self, dto: UserSaveDto) -> Result<User, ServiceError> {
        dto.validate()?;

        let new_user = NewUser {
            name: dto.name.trim().to_string(),
            email: normalize_email(&dto.email),
            password: hash_password(&dto.password)?,
            role: dto.role,
        };

        let user = self.users.insert(new_user).await?;
        info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Merge the present fields of `dto` into user `id`. The role is never touched here.
    pub async fn update(&self, id: i64, dto: UserUpdateDto) -> Result<User, ServiceError> {
        dto.validate()?;

        let mut user = self.get_by_id(id).await?;
        if let Some(name) = dto.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = dto.email {
            user.email = normalize_email(&email);
        }
        if let Some(password) = dto.password {
            user.password = hash_password(&password)?;
        }

        let updated = self.users.update(&user).await?;
        info!(user_id = updated.id, "User updated");
        Ok(updated)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User, ServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    pub async fn list_all(&self, page: &PageRequest) -> Result<PageModel<User>, ServiceError> {
        let slice = self.users.find_all(page).await?;
        Ok(PageModel::new(page, slice))
    }

    pub async fn update_role(&self, id: i64, role: Role) -> Result<(), ServiceError> {
        match self.users.update_role(id, role).await? {
            0 => Err(ServiceError::NotFound(format!("User {} not found", id))),
            _ => {
                info!(user_id = id, role = %role, "User role changed");
                Ok(())
            }
        }
    }

    /// Check credentials, returning the matching user
    pub async fn authenticate(&self, dto: UserLoginDto) -> Result<User, ServiceError> {
        dto.validate()?;

        let email = normalize_email(&dto.email);
        match self.users.find_by_email(&email).await? {
            Some(user) if verify_password(&dto.password, &user.password) => {
                debug!(user_id = user.id, "Credentials accepted");
                Ok(user)
            }
            Some(_) => {
                warn!(email = %email, "Login rejected: wrong password");
                Err(ServiceError::InvalidCredentials)
            }
            None => {
                warn!(email = %email, "Login rejected: unknown email");
                Err(ServiceError::InvalidCredentials)
            }
        }
    }
}
