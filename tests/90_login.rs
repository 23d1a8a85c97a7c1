mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use request_tracker::auth::JwtManager;
use request_tracker::config::AppConfig;

#[tokio::test]
async fn login_issues_token_for_the_user() -> Result<()> {
    let server = common::TestServer::start().await?;

    let token = server.admin_token().await?;

    let jwt = JwtManager::from_config(&AppConfig::in_memory().security)?;
    let claims = jwt.verify(&token)?;
    assert_eq!(claims.sub, common::ADMIN_EMAIL);
    assert_eq!(claims.roles, vec!["ROLE_ADMINISTRATOR".to_string()]);
    Ok(())
}

#[tokio::test]
async fn simple_user_token_carries_simple_role() -> Result<()> {
    let server = common::TestServer::start().await?;
    server.simple_user("reader@example.com").await?;

    let token = server.login("reader@example.com", "simple-password").await?;
    let claims = JwtManager::from_config(&AppConfig::in_memory().security)?.verify(&token)?;
    assert_eq!(claims.sub, "reader@example.com");
    assert_eq!(claims.roles, vec!["ROLE_SIMPLE".to_string()]);
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_rejected() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/users/login"))
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": "not-the-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn unknown_email_is_rejected_like_wrong_password() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/users/login"))
        .json(&json!({ "email": "nobody@example.com", "password": "whatever-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Invalid email or password");
    Ok(())
}

#[tokio::test]
async fn malformed_login_body_is_bad_request() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/users/login"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}
