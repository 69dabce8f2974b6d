use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::store::DynStore;

use super::{ApiError, RequiredFields};

pub async fn list_roles(Extension(store): Extension<DynStore>) -> Result<Response, ApiError> {
    let roles = store.list_roles().await?;
    Ok((StatusCode::OK, Json(roles)).into_response())
}

pub async fn get_role(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let role = store.get_role(id).await?;
    Ok((StatusCode::OK, Json(role)).into_response())
}

#[derive(serde::Deserialize)]
pub struct CreateRoleRequest {
    name: Option<String>,
}

pub async fn create_role(
    Extension(store): Extension<DynStore>,
    Json(payload): Json<CreateRoleRequest>,
) -> Result<Response, ApiError> {
    let mut required = RequiredFields::new();
    let name = required.string("name", payload.name);
    required.check()?;

    let role = store.create_role(name).await?;
    Ok((StatusCode::CREATED, Json(role)).into_response())
}

pub async fn delete_role(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    store.delete_role(id).await?;
    Ok((StatusCode::OK, Json(json!({"message": "Role deleted"}))).into_response())
}

pub async fn list_permissions(
    Extension(store): Extension<DynStore>,
) -> Result<Response, ApiError> {
    let permissions = store.list_permissions().await?;
    Ok((StatusCode::OK, Json(permissions)).into_response())
}

pub async fn role_permissions(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let permissions = store.role_permissions(id).await?;
    Ok((StatusCode::OK, Json(permissions)).into_response())
}

#[derive(serde::Deserialize)]
pub struct ReplacePermissionsRequest {
    permission_ids: Option<Vec<i32>>,
}

pub async fn replace_role_permissions(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
    Json(payload): Json<ReplacePermissionsRequest>,
) -> Result<Response, ApiError> {
    let permission_ids = payload
        .permission_ids
        .ok_or_else(|| ApiError::BadRequest("permission_ids must be an array".to_string()))?;
    store.replace_role_permissions(id, permission_ids).await?;
    Ok((StatusCode::OK, Json(json!({"success": true}))).into_response())
}
