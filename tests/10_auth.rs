mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_and_root_respond() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");

    let res = server.client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], "Job Tracker API");
    Ok(())
}

#[tokio::test]
async fn register_returns_token_and_message() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/v1/auth/register"))
        .json(&json!({ "name": "Ann", "username": "ann@x.io", "password": "secret1" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Successfully registered user");
    assert!(!body["token"].as_str().unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
async fn register_reports_every_violation_in_field_order() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/v1/auth/register"))
        .json(&json!({ "name": "", "username": "bad", "password": "123" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::message(res).await?,
        "Please enter name, Please provide a valid email, Password must be at least 6 characters"
    );
    Ok(())
}

#[tokio::test]
async fn register_with_empty_body_names_every_field() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/v1/auth/register"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let message = common::message(res).await?;
    assert!(message.starts_with("Please enter name, Please enter username"));
    assert!(message.contains("Please enter password"));
    Ok(())
}

#[tokio::test]
async fn register_with_only_username() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/v1/auth/register"))
        .json(&json!({ "username": "new@gmail.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::message(res).await?,
        "Please enter name, Please enter password, Password must be at least 6 characters"
    );
    Ok(())
}

#[tokio::test]
async fn register_rejects_address_with_display_name() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/v1/auth/register"))
        .json(&json!({ "name": "Ann", "username": "Ann <ann@x.io>", "password": "secret1" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::message(res).await?, "Please provide a valid email");
    Ok(())
}

#[tokio::test]
async fn register_rejects_taken_username() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("Ann", "ann@x.io", "secret1").await?;

    let res = server
        .client
        .post(server.url("/api/v1/auth/register"))
        .json(&json!({ "name": "Other", "username": "ann@x.io", "password": "another1" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::message(res).await?, "Username already exists");
    Ok(())
}

#[tokio::test]
async fn register_rejects_malformed_json() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/v1/auth/register"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn login_succeeds_with_registered_credentials() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("Ann", "ann@x.io", "secret1").await?;

    let res = server
        .client
        .post(server.url("/api/v1/auth/login"))
        .json(&json!({ "username": "ann@x.io", "password": "secret1" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    // The issued token opens the protected routes
    let res = server
        .client
        .get(server.url("/api/v1/jobs"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_failures_are_indistinguishable() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("Ann", "ann@x.io", "secret1").await?;

    let wrong_password = server
        .client
        .post(server.url("/api/v1/auth/login"))
        .json(&json!({ "username": "ann@x.io", "password": "wrong-one" }))
        .send()
        .await?;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_user = server
        .client
        .post(server.url("/api/v1/auth/login"))
        .json(&json!({ "username": "nobody@x.io", "password": "secret1" }))
        .send()
        .await?;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(
        common::message(wrong_password).await?,
        common::message(unknown_user).await?
    );
    Ok(())
}

#[tokio::test]
async fn login_validates_before_lookup() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/v1/auth/login"))
        .json(&json!({ "username": "ann@x.io" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::message(res).await?, "Please enter password");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/api/v1/nothing")).send().await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::message(res).await?, "Route does not exist");
    Ok(())
}

#[tokio::test]
async fn wrong_method_on_known_path_is_json() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/api/v1/auth/login")).send().await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::message(res).await?, "Route does not exist");

    let res = server.client.put(server.url("/api/v1/jobs")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::message(res).await?, "Route does not exist");
    Ok(())
}
