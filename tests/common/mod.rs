#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};

use request_tracker::config::AppConfig;
use request_tracker::dto::UserSaveDto;
use request_tracker::types::Role;
use request_tracker::{router, AppState};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// One in-memory server per test, bound to a free port
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Start a server seeded with one administrator account
    pub async fn start() -> Result<Self> {
        let state = AppState::in_memory(AppConfig::in_memory())?;
        state
            .users
            .save(UserSaveDto {
                name: "Administrator".to_string(),
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
                role: Role::Administrator,
            })
            .await?;

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, router(state)).await;
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, token: &str, path: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    pub fn post(&self, token: &str, path: &str, body: &Value) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token).json(body)
    }

    pub fn put(&self, token: &str, path: &str, body: &Value) -> RequestBuilder {
        self.client.put(self.url(path)).bearer_auth(token).json(body)
    }

    pub fn patch(&self, token: &str, path: &str, body: &Value) -> RequestBuilder {
        self.client.patch(self.url(path)).bearer_auth(token).json(body)
    }

    /// Log in and return the bearer token, failing on anything but 200
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/users/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed with {}", res.status());

        let body: Value = res.json().await?;
        body["data"]
            .as_str()
            .map(str::to_string)
            .context("login response carried no token")
    }

    pub async fn admin_token(&self) -> Result<String> {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Create a user through the admin API and return its JSON
    pub async fn create_user(&self, admin_token: &str, email: &str, password: &str, role: &str) -> Result<Value> {
        let res = self
            .post(
                admin_token,
                "/users",
                &json!({
                    "name": "Test User",
                    "email": email,
                    "password": password,
                    "role": role
                }),
            )
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "user creation failed with {}", res.status());

        let body: Value = res.json().await?;
        Ok(body["data"].clone())
    }

    /// Create a simple user and log in as them, returning `(user, token)`
    pub async fn simple_user(&self, email: &str) -> Result<(Value, String)> {
        let admin = self.admin_token().await?;
        let user = self.create_user(&admin, email, "simple-password", "SIMPLE").await?;
        let token = self.login(email, "simple-password").await?;
        Ok((user, token))
    }

    /// Open a request as the token's user and return its JSON
    pub async fn open_request(&self, token: &str, subject: &str) -> Result<Value> {
        let res = self
            .post(token, "/requests", &json!({ "subject": subject, "description": "created by test" }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "request creation failed with {}", res.status());

        let body: Value = res.json().await?;
        Ok(body["data"].clone())
    }
}
