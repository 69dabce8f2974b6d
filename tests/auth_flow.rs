//! Register/login/session lifecycle.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{assert_error, body_json, get, request, spawn_app};
use serde_json::json;

#[tokio::test]
async fn register_creates_a_user_without_exposing_the_hash() {
    let app = spawn_app().await;

    let response = request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Demo User",
            "email": "demo@shelter.org",
            "password": "hunter2hunter2",
            "phone": "1234567890"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["email"], "demo@shelter.org");
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn register_requires_name_email_and_password() {
    let app = spawn_app().await;

    let response = request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": "demo@shelter.org"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("name"));
    assert!(message.contains("password"));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = spawn_app().await;

    let payload = json!({
        "name": "Demo User",
        "email": "demo@shelter.org",
        "password": "hunter2hunter2"
    });
    let response = request(&app, Method::POST, "/api/auth/register", None, Some(payload.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = request(&app, Method::POST, "/api/auth/register", None, Some(payload)).await;
    assert_error(response, StatusCode::CONFLICT, "Email already exists").await;
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = spawn_app().await;

    request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Demo User",
            "email": "demo@shelter.org",
            "password": "hunter2hunter2"
        })),
    )
    .await;

    let response = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "demo@shelter.org", "password": "wrong"})),
    )
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "Invalid email or password").await;
}

#[tokio::test]
async fn login_issues_a_session_cookie_that_me_accepts() {
    let app = spawn_app().await;

    request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Demo User",
            "email": "demo@shelter.org",
            "password": "hunter2hunter2"
        })),
    )
    .await;

    let response = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "demo@shelter.org", "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set a session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("shelterdesk_user="));
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let body = body_json(response).await;
    assert_eq!(body["email"], "demo@shelter.org");

    let response = get(&app, "/api/auth/me", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["name"], "Demo User");
    assert!(me["role"].is_null(), "fresh registrations carry no role");
}
