//! Shared harness for the integration tests: an app over in-memory SQLite
//! with migrations applied, plus small request/response helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use shelterdesk_server::app::build_router;
use shelterdesk_server::auth::PermissionTable;
use shelterdesk_server::migrator::Migrator;
use shelterdesk_server::store::{DynStore, NewUser, SeaOrmStore};

pub struct TestApp {
    pub router: Router,
    pub store: DynStore,
}

/// Builds the full router over a fresh in-memory SQLite database. A single
/// pooled connection keeps every query on the same in-memory instance.
pub async fn spawn_app() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory sqlite");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let store: DynStore = Arc::new(SeaOrmStore::new(db));
    let router = build_router(
        store.clone(),
        Arc::new(PermissionTable::shelter_defaults()),
        "http://localhost:3000",
    );
    TestApp { router, store }
}

/// Creates a user directly through the store (bypassing the register
/// endpoint) and optionally assigns one of the seeded roles.
pub async fn seed_user(app: &TestApp, name: &str, email: &str, role: Option<&str>) -> i32 {
    let user = app
        .store
        .create_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            phone: None,
        })
        .await
        .expect("failed to seed user");

    if let Some(role_name) = role {
        let roles = app.store.list_roles().await.expect("failed to list roles");
        let role = roles
            .iter()
            .find(|r| r.name == role_name)
            .unwrap_or_else(|| panic!("seeded role {role_name} missing"));
        app.store
            .assign_role(user.id, role.id)
            .await
            .expect("failed to assign role");
    }

    user.id
}

pub fn session_cookie(user_id: i32) -> String {
    format!("shelterdesk_user={user_id}")
}

/// Sends one request through the router. `cookie` is a raw `Cookie` header
/// value; `body` is serialized as JSON when present.
pub async fn request(
    app: &TestApp,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("failed to build request"),
        None => builder.body(Body::empty()).expect("failed to build request"),
    };

    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("request failed")
}

pub async fn get(app: &TestApp, uri: &str, cookie: Option<&str>) -> Response<Body> {
    request(app, Method::GET, uri, cookie, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// Asserts the standard error shape: given status plus a message that
/// contains the expected fragment.
pub async fn assert_error(response: Response<Body>, status: StatusCode, fragment: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap_or_default().to_string();
    assert!(
        message.contains(fragment),
        "error message {message:?} does not contain {fragment:?}"
    );
}
