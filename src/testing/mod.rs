//! Helpers for unit tests that need a fully wired in-memory application.

use crate::config::AppConfig;
use crate::database::models::User;
use crate::dto::UserSaveDto;
use crate::state::AppState;
use crate::types::Role;

pub const TEST_PASSWORD: &str = "secret-password";

pub struct TestContext {
    pub state: AppState,
}

impl TestContext {
    pub fn new() -> Self {
        let state = AppState::in_memory(AppConfig::in_memory()).expect("in-memory state");
        Self { state }
    }

    pub async fn create_user(&self, email: &str) -> User {
        self.create_with_role(email, Role::Simple).await
    }

    pub async fn create_admin(&self, email: &str) -> User {
        self.create_with_role(email, Role::Administrator).await
    }

    async fn create_with_role(&self, email: &str, role: Role) -> User {
        self.state
            .users
            .save(UserSaveDto {
                name: "Test User".to_string(),
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                role,
            })
            .await
            .expect("create test user")
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state
            .jwt
            .create_token(user.id, &user.email, vec![user.role.authority()])
            .expect("issue test token")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
