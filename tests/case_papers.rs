//! Case-paper CRUD: defaults, validation, round trips, soft delete.

mod common;

use axum::http::{Method, StatusCode};
use common::{assert_error, body_json, get, request, seed_user, session_cookie, spawn_app};
use serde_json::{json, Value};

fn sample_paper() -> Value {
    json!({
        "date": "2025-05-06",
        "admission_date": "2025-05-06",
        "informer_name": "Ravi Kumar",
        "phone": "9876543210",
        "alt_phone": "9876500000",
        "location": "MG Road",
        "animal_type": "dog",
        "animal_name": "Max",
        "gender": "male",
        "age": 3,
        "history": "Hit by a vehicle",
        "symptoms": "Limping, shallow breathing",
        "treatment": "X-ray, splint, rest",
        "by_whom": "Dr. Sarah"
    })
}

#[tokio::test]
async fn create_defaults_status_to_active() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(sample_paper()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let paper = body_json(response).await;
    assert_eq!(paper["status"], "active");
    assert!(paper["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn create_with_missing_phone_names_the_field_and_writes_nothing() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let mut payload = sample_paper();
    payload.as_object_mut().unwrap().remove("phone");

    let response = request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(payload),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "phone").await;

    // No row must have been created.
    let response = get(&app, "/api/case-papers", Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn validation_collects_every_missing_field() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(json!({"date": "2025-05-06"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    for field in ["informer_name", "phone", "animal_type", "gender", "treatment", "by_whom"] {
        assert!(message.contains(field), "message {message:?} must name {field}");
    }
}

#[tokio::test]
async fn create_then_fetch_round_trips_submitted_fields() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let submitted = sample_paper();
    let response = request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(submitted.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = get(&app, &format!("/api/case-papers/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;

    for (key, value) in submitted.as_object().unwrap() {
        assert_eq!(&fetched[key], value, "field {key} must round-trip");
    }
}

#[tokio::test]
async fn update_is_a_full_replace_including_status() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(sample_paper()),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let mut replacement = sample_paper();
    replacement["treatment"] = json!("Splint removed, recovering");
    replacement["status"] = json!("discharged");

    let response = request(
        &app,
        Method::PUT,
        &format!("/api/case-papers/{id}"),
        Some(&cookie),
        Some(replacement),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "discharged");
    assert_eq!(updated["treatment"], "Splint removed, recovering");
}

#[tokio::test]
async fn update_without_status_is_rejected() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(sample_paper()),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = request(
        &app,
        Method::PUT,
        &format!("/api/case-papers/{id}"),
        Some(&cookie),
        Some(sample_paper()),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "status").await;
}

#[tokio::test]
async fn invalid_status_value_is_rejected() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(sample_paper()),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let mut replacement = sample_paper();
    replacement["status"] = json!("adopted");

    let response = request(
        &app,
        Method::PUT,
        &format!("/api/case-papers/{id}"),
        Some(&cookie),
        Some(replacement),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "Invalid status").await;
}

#[tokio::test]
async fn delete_hides_the_paper_from_list_and_get() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(sample_paper()),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = request(
        &app,
        Method::DELETE,
        &format!("/api/case-papers/{id}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, &format!("/api/case-papers/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, "/api/case-papers", Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn deleting_a_nonexistent_paper_returns_404_not_500() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(&app, Method::DELETE, "/api/case-papers/42", Some(&cookie), None).await;
    assert_error(response, StatusCode::NOT_FOUND, "not found").await;
}

#[tokio::test]
async fn list_can_filter_by_status() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(sample_paper()),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let mut discharged = sample_paper();
    discharged["status"] = json!("discharged");
    request(
        &app,
        Method::PUT,
        &format!("/api/case-papers/{id}"),
        Some(&cookie),
        Some(discharged),
    )
    .await;

    request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(sample_paper()),
    )
    .await;

    let response = get(&app, "/api/case-papers?status=active", Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["status"], "active");
}
