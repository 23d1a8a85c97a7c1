mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn opened_request_belongs_to_caller() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (alice, token) = server.simple_user("alice@example.com").await?;

    let request = server.open_request(&token, "Broken chair").await?;
    assert_eq!(request["subject"], "Broken chair");
    assert_eq!(request["state"], "OPEN");
    assert_eq!(request["owner_id"], alice["id"]);

    let body: Value = server
        .get(&token, &format!("/requests/{}", request["id"]))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"], request);
    Ok(())
}

#[tokio::test]
async fn owner_updates_request_state() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.simple_user("alice@example.com").await?;
    let request = server.open_request(&token, "Broken chair").await?;

    let res = server
        .put(&token, &format!("/requests/{}", request["id"]), &json!({ "state": "IN_PROGRESS" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["data"]["state"], "IN_PROGRESS");
    assert_eq!(body["data"]["subject"], "Broken chair");
    assert_eq!(body["data"]["owner_id"], request["owner_id"]);
    Ok(())
}

#[tokio::test]
async fn non_owner_update_is_rejected_before_mutation() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, alice_token) = server.simple_user("alice@example.com").await?;
    let (_, bob_token) = server.simple_user("bob@example.com").await?;
    let request = server.open_request(&alice_token, "Broken chair").await?;
    let path = format!("/requests/{}", request["id"]);

    let res = server
        .put(&bob_token, &path, &json!({ "subject": "Mine now", "state": "CLOSED" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body: Value = server.get(&alice_token, &path).send().await?.json().await?;
    assert_eq!(body["data"]["subject"], "Broken chair");
    assert_eq!(body["data"]["state"], "OPEN");
    Ok(())
}

#[tokio::test]
async fn unknown_request_is_not_found() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.simple_user("alice@example.com").await?;

    let res = server.get(&token, "/requests/424242").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .put(&token, "/requests/424242", &json!({ "subject": "Ghost" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn blank_subject_is_rejected() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.simple_user("alice@example.com").await?;

    let res = server.post(&token, "/requests", &json!({ "subject": "   " })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert!(body["field_errors"]["subject"].is_string());
    Ok(())
}

#[tokio::test]
async fn request_list_pages_never_exceed_size() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.simple_user("alice@example.com").await?;
    for i in 0..5 {
        server.open_request(&token, &format!("Request {}", i)).await?;
    }

    let body: Value = server.get(&token, "/requests?page=0&size=3").send().await?.json().await?;
    let page = &body["data"];
    assert_eq!(page["page"], 0);
    assert_eq!(page["total_elements"], 5);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["elements"][0]["subject"], "Request 0");
    assert!(page["elements"].as_array().map_or(0, Vec::len) <= 3);

    let body: Value = server.get(&token, "/requests?page=4&size=3").send().await?.json().await?;
    assert_eq!(body["data"]["page"], 4);
    assert_eq!(body["data"]["elements"], json!([]));
    Ok(())
}

#[tokio::test]
async fn owner_attaches_files_to_request() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, alice_token) = server.simple_user("alice@example.com").await?;
    let (_, bob_token) = server.simple_user("bob@example.com").await?;
    let request = server.open_request(&alice_token, "Broken chair").await?;
    let path = format!("/requests/{}/files", request["id"]);

    let res = server
        .post(&alice_token, &path, &json!({ "name": "photo.jpg", "location": "s3://tracker/photo.jpg" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["request_id"], request["id"]);

    let res = server
        .post(&bob_token, &path, &json!({ "name": "spam.exe", "location": "s3://tracker/spam.exe" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body: Value = server.get(&bob_token, &path).send().await?.json().await?;
    assert_eq!(body["data"]["total_elements"], 1);
    assert_eq!(body["data"]["elements"][0]["name"], "photo.jpg");
    Ok(())
}
