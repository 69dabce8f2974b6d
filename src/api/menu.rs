use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::store::{DynStore, MenuFields};

use super::{ApiError, RequiredFields};

#[derive(serde::Deserialize)]
pub struct MenuPayload {
    name: Option<String>,
    category: Option<String>,
    description: Option<String>,
}

fn validate(payload: MenuPayload) -> Result<MenuFields, ApiError> {
    let mut required = RequiredFields::new();
    let name = required.string("name", payload.name);
    required.check()?;

    Ok(MenuFields {
        name,
        category: payload.category,
        description: payload.description,
    })
}

pub async fn list_menu_items(Extension(store): Extension<DynStore>) -> Result<Response, ApiError> {
    let items = store.list_menu_items().await?;
    Ok((StatusCode::OK, Json(items)).into_response())
}

pub async fn get_menu_item(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let item = store.get_menu_item(id).await?;
    Ok((StatusCode::OK, Json(item)).into_response())
}

pub async fn create_menu_item(
    Extension(store): Extension<DynStore>,
    Json(payload): Json<MenuPayload>,
) -> Result<Response, ApiError> {
    let fields = validate(payload)?;
    let item = store.create_menu_item(fields).await?;
    Ok((StatusCode::CREATED, Json(item)).into_response())
}

pub async fn update_menu_item(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
    Json(payload): Json<MenuPayload>,
) -> Result<Response, ApiError> {
    let fields = validate(payload)?;
    let item = store.replace_menu_item(id, fields).await?;
    Ok((StatusCode::OK, Json(item)).into_response())
}

pub async fn delete_menu_item(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    store.delete_menu_item(id).await?;
    Ok((StatusCode::OK, Json(json!({"message": "Menu item deleted"}))).into_response())
}
