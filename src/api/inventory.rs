use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::auth::AuthUser;
use crate::store::{ActivityInput, DynStore, InventoryFields};

use super::{ApiError, RequiredFields};

const CATEGORIES: [&str; 4] = ["food", "medicine", "equipment", "supplies"];

#[derive(serde::Deserialize)]
pub struct InventoryPayload {
    name: Option<String>,
    category: Option<String>,
    current_stock: Option<i32>,
    minimum_level: Option<i32>,
    unit: Option<String>,
}

fn validate(payload: InventoryPayload) -> Result<InventoryFields, ApiError> {
    let mut required = RequiredFields::new();
    let name = required.string("name", payload.name);
    let category = required.string("category", payload.category);
    let current_stock = required.required("current_stock", payload.current_stock);
    let minimum_level = required.required("minimum_level", payload.minimum_level);
    let unit = required.string("unit", payload.unit);
    required.check()?;

    if !CATEGORIES.contains(&category.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "Invalid category '{category}', expected one of: {}",
            CATEGORIES.join(", ")
        )));
    }
    if current_stock < 0 || minimum_level < 0 {
        return Err(ApiError::BadRequest(
            "Stock levels cannot be negative".to_string(),
        ));
    }

    Ok(InventoryFields {
        name,
        category,
        current_stock,
        minimum_level,
        unit,
    })
}

pub async fn list_inventory_items(
    Extension(store): Extension<DynStore>,
) -> Result<Response, ApiError> {
    let items = store.list_inventory_items().await?;
    Ok((StatusCode::OK, Json(items)).into_response())
}

pub async fn get_inventory_item(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let item = store.get_inventory_item(id).await?;
    Ok((StatusCode::OK, Json(item)).into_response())
}

pub async fn create_inventory_item(
    Extension(store): Extension<DynStore>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<InventoryPayload>,
) -> Result<Response, ApiError> {
    let fields = validate(payload)?;
    let item = store.create_inventory_item(fields).await?;

    let input = ActivityInput {
        user: user.name.clone(),
        kind: "inventory_added".to_string(),
        description: format!("Added {} to inventory", item.name),
        subject_type: Some("inventory".to_string()),
        subject_id: Some(item.id),
    };
    if let Err(e) = store.record_activity(input).await {
        tracing::warn!("failed to record activity: {e}");
    }

    Ok((StatusCode::CREATED, Json(item)).into_response())
}

pub async fn update_inventory_item(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
    Json(payload): Json<InventoryPayload>,
) -> Result<Response, ApiError> {
    let fields = validate(payload)?;
    let item = store.replace_inventory_item(id, fields).await?;
    Ok((StatusCode::OK, Json(item)).into_response())
}

pub async fn delete_inventory_item(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    store.delete_inventory_item(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Inventory item deleted"})),
    )
        .into_response())
}
