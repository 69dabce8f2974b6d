use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::auth::AuthUser;
use crate::store::{ActivityInput, DynStore, NewUser, UserFields};

use super::auth::hash_password;
use super::{ApiError, RequiredFields};

pub async fn list_users(Extension(store): Extension<DynStore>) -> Result<Response, ApiError> {
    let users = store.list_users().await?;
    Ok((StatusCode::OK, Json(users)).into_response())
}

pub async fn get_user(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let user = store.get_user(id).await?;
    Ok((StatusCode::OK, Json(json!({ "data": user }))).into_response())
}

#[derive(serde::Deserialize)]
pub struct CreateUserRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone: Option<String>,
}

pub async fn create_user(
    Extension(store): Extension<DynStore>,
    Extension(actor): Extension<AuthUser>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Response, ApiError> {
    let mut required = RequiredFields::new();
    let name = required.string("name", payload.name);
    let email = required.string("email", payload.email);
    let password = required.string("password", payload.password);
    required.check()?;

    let password_hash = hash_password(&password)?;
    let user = store
        .create_user(NewUser {
            name,
            email,
            password_hash,
            phone: payload.phone,
        })
        .await?;

    let input = ActivityInput {
        user: actor.name.clone(),
        kind: "user_created".to_string(),
        description: format!("Added new user: {}", user.name),
        subject_type: Some("user".to_string()),
        subject_id: Some(user.id),
    };
    if let Err(e) = store.record_activity(input).await {
        tracing::warn!("failed to record activity: {e}");
    }

    Ok((StatusCode::CREATED, Json(user)).into_response())
}

#[derive(serde::Deserialize)]
pub struct UpdateUserRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

pub async fn update_user(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Response, ApiError> {
    let mut required = RequiredFields::new();
    let name = required.string("name", payload.name);
    let email = required.string("email", payload.email);
    required.check()?;

    let user = store
        .update_user(
            id,
            UserFields {
                name,
                email,
                phone: payload.phone,
            },
        )
        .await?;
    Ok((StatusCode::OK, Json(user)).into_response())
}

pub async fn delete_user(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    store.delete_user(id).await?;
    Ok((StatusCode::OK, Json(json!({"message": "User deleted"}))).into_response())
}

#[derive(serde::Deserialize)]
pub struct AssignRoleRequest {
    role_id: Option<i32>,
}

pub async fn assign_role(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
    Json(payload): Json<AssignRoleRequest>,
) -> Result<Response, ApiError> {
    let role_id = payload
        .role_id
        .ok_or(ApiError::MissingFields(vec!["role_id"]))?;
    store.assign_role(id, role_id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({"message": "User role updated successfully"})),
    )
        .into_response())
}
