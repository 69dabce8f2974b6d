//! Feeding, cleaning, menu, and inventory records, plus the dashboard
//! counters and the activity feed they drive.

mod common;

use axum::http::{Method, StatusCode};
use common::{assert_error, body_json, get, request, seed_user, session_cookie, spawn_app};
use serde_json::json;

#[tokio::test]
async fn feeding_record_round_trip() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/feeding",
        Some(&cookie),
        Some(json!({
            "fed_at": "2025-05-06T08:00:00",
            "morning_value": 200,
            "evening_value": 200,
            "by_whom": "John Smith",
            "notes": "Ate well"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let fetched = body_json(get(&app, &format!("/api/feeding/{id}"), Some(&cookie)).await).await;
    assert_eq!(fetched["by_whom"], "John Smith");
    assert_eq!(fetched["morning_value"], 200);
    assert_eq!(fetched["fed_at"], "2025-05-06T08:00:00");
}

#[tokio::test]
async fn feeding_requires_fed_at_and_by_whom() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(&app, Method::POST, "/api/feeding", Some(&cookie), Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("fed_at"));
    assert!(message.contains("by_whom"));
}

#[tokio::test]
async fn deleting_a_missing_feeding_record_returns_404() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(&app, Method::DELETE, "/api/feeding/7", Some(&cookie), None).await;
    assert_error(response, StatusCode::NOT_FOUND, "Feeding record not found").await;
}

#[tokio::test]
async fn cleaning_record_starts_pending_and_can_be_completed() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/cleaning",
        Some(&cookie),
        Some(json!({
            "area": "Dog Kennel A",
            "cleaned_at": "2025-05-06T09:00:00",
            "by_whom": "Jane Doe",
            "notes": "Deep cleaned and sanitized"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["status"], "pending");
    let id = created["id"].as_i64().unwrap();

    let response = request(
        &app,
        Method::PUT,
        &format!("/api/cleaning/{id}"),
        Some(&cookie),
        Some(json!({
            "area": "Dog Kennel A",
            "cleaned_at": "2025-05-06T09:30:00",
            "by_whom": "Jane Doe",
            "status": "completed"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "completed");
}

#[tokio::test]
async fn cleaning_rejects_unknown_status() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/cleaning",
        Some(&cookie),
        Some(json!({
            "area": "Cattery",
            "cleaned_at": "2025-05-06T09:00:00",
            "by_whom": "Jane Doe",
            "status": "spotless"
        })),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "Invalid status").await;
}

#[tokio::test]
async fn menu_item_crud() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/menu",
        Some(&cookie),
        Some(json!({"name": "Rice and chicken", "category": "dog"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = request(
        &app,
        Method::PUT,
        &format!("/api/menu/{id}"),
        Some(&cookie),
        Some(json!({"name": "Rice and mutton", "category": "dog"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let items = body_json(get(&app, "/api/menu", Some(&cookie)).await).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["name"], "Rice and mutton");

    let response = request(&app, Method::DELETE, &format!("/api/menu/{id}"), Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, &format!("/api/menu/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inventory_rejects_unknown_category() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    let response = request(
        &app,
        Method::POST,
        "/api/inventory",
        Some(&cookie),
        Some(json!({
            "name": "Dog Food",
            "category": "snacks",
            "current_stock": 50,
            "minimum_level": 20,
            "unit": "kg"
        })),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "Invalid category").await;
}

#[tokio::test]
async fn dashboard_counts_cases_cleanings_and_low_stock() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Staff", "staff@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(json!({
            "date": "2025-05-06",
            "informer_name": "Ravi Kumar",
            "phone": "9876543210",
            "animal_type": "dog",
            "gender": "male",
            "treatment": "Rest",
            "by_whom": "Dr. Sarah"
        })),
    )
    .await;

    request(
        &app,
        Method::POST,
        "/api/cleaning",
        Some(&cookie),
        Some(json!({
            "area": "Cattery",
            "cleaned_at": "2025-05-06T09:00:00",
            "by_whom": "Jane Doe"
        })),
    )
    .await;

    // Below the minimum level, so it counts as low stock.
    request(
        &app,
        Method::POST,
        "/api/inventory",
        Some(&cookie),
        Some(json!({
            "name": "Antibiotics",
            "category": "medicine",
            "current_stock": 3,
            "minimum_level": 10,
            "unit": "boxes"
        })),
    )
    .await;

    let stats = body_json(get(&app, "/api/dashboard/stats", Some(&cookie)).await).await;
    assert_eq!(stats["total_cases"], 1);
    assert_eq!(stats["active_cases"], 1);
    assert_eq!(stats["pending_cleanings"], 1);
    assert_eq!(stats["low_inventory_items"], 1);
}

#[tokio::test]
async fn mutations_show_up_in_the_recent_activity_feed() {
    let app = spawn_app().await;
    let user = seed_user(&app, "Dr. Sarah Johnson", "sarah@shelter.org", Some("staff")).await;
    let cookie = session_cookie(user);

    request(
        &app,
        Method::POST,
        "/api/case-papers",
        Some(&cookie),
        Some(json!({
            "date": "2025-05-06",
            "informer_name": "Ravi Kumar",
            "phone": "9876543210",
            "animal_type": "dog",
            "animal_name": "Max",
            "gender": "male",
            "treatment": "Rest",
            "by_whom": "Dr. Sarah"
        })),
    )
    .await;

    let activities = body_json(get(&app, "/api/activities/recent", Some(&cookie)).await).await;
    let activities = activities.as_array().unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0]["user"], "Dr. Sarah Johnson");
    assert_eq!(activities[0]["kind"], "case_created");
    assert_eq!(activities[0]["subject_type"], "case_paper");
}
