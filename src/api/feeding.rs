use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde_json::json;

use crate::auth::AuthUser;
use crate::store::{ActivityInput, DynStore, FeedingFields};

use super::{ApiError, RequiredFields};

#[derive(serde::Deserialize)]
pub struct FeedingPayload {
    case_paper_id: Option<i32>,
    fed_at: Option<NaiveDateTime>,
    morning_menu_id: Option<i32>,
    morning_value: Option<i32>,
    evening_menu_id: Option<i32>,
    evening_value: Option<i32>,
    by_whom: Option<String>,
    notes: Option<String>,
}

fn validate(payload: FeedingPayload) -> Result<FeedingFields, ApiError> {
    let mut required = RequiredFields::new();
    let fed_at = required.required("fed_at", payload.fed_at);
    let by_whom = required.string("by_whom", payload.by_whom);
    required.check()?;

    Ok(FeedingFields {
        case_paper_id: payload.case_paper_id,
        fed_at,
        morning_menu_id: payload.morning_menu_id,
        morning_value: payload.morning_value,
        evening_menu_id: payload.evening_menu_id,
        evening_value: payload.evening_value,
        by_whom,
        notes: payload.notes,
    })
}

pub async fn list_feeding_records(
    Extension(store): Extension<DynStore>,
) -> Result<Response, ApiError> {
    let records = store.list_feeding_records().await?;
    Ok((StatusCode::OK, Json(records)).into_response())
}

pub async fn get_feeding_record(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let record = store.get_feeding_record(id).await?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

pub async fn create_feeding_record(
    Extension(store): Extension<DynStore>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<FeedingPayload>,
) -> Result<Response, ApiError> {
    let fields = validate(payload)?;
    let record = store.create_feeding_record(fields).await?;

    let input = ActivityInput {
        user: user.name.clone(),
        kind: "feeding_recorded".to_string(),
        description: format!("Recorded feeding by {}", record.by_whom),
        subject_type: Some("feeding_record".to_string()),
        subject_id: Some(record.id),
    };
    if let Err(e) = store.record_activity(input).await {
        tracing::warn!("failed to record activity: {e}");
    }

    Ok((StatusCode::CREATED, Json(record)).into_response())
}

pub async fn update_feeding_record(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
    Json(payload): Json<FeedingPayload>,
) -> Result<Response, ApiError> {
    let fields = validate(payload)?;
    let record = store.replace_feeding_record(id, fields).await?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

pub async fn delete_feeding_record(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    store.delete_feeding_record(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Feeding record deleted"})),
    )
        .into_response())
}
