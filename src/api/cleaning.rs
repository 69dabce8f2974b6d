use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde_json::json;

use crate::auth::AuthUser;
use crate::store::{ActivityInput, CleaningFields, DynStore};

use super::{ApiError, RequiredFields};

const STATUSES: [&str; 3] = ["pending", "completed", "verified"];

#[derive(serde::Deserialize)]
pub struct CleaningPayload {
    area: Option<String>,
    cleaned_at: Option<NaiveDateTime>,
    by_whom: Option<String>,
    notes: Option<String>,
    status: Option<String>,
}

fn validate(payload: CleaningPayload) -> Result<(CleaningFields, Option<String>), ApiError> {
    let mut required = RequiredFields::new();
    let area = required.string("area", payload.area);
    let cleaned_at = required.required("cleaned_at", payload.cleaned_at);
    let by_whom = required.string("by_whom", payload.by_whom);
    required.check()?;

    if let Some(status) = payload.status.as_deref() {
        if !STATUSES.contains(&status) {
            return Err(ApiError::BadRequest(format!(
                "Invalid status '{status}', expected one of: {}",
                STATUSES.join(", ")
            )));
        }
    }

    Ok((
        CleaningFields {
            area,
            cleaned_at,
            by_whom,
            notes: payload.notes,
        },
        payload.status,
    ))
}

pub async fn list_cleaning_records(
    Extension(store): Extension<DynStore>,
) -> Result<Response, ApiError> {
    let records = store.list_cleaning_records().await?;
    Ok((StatusCode::OK, Json(records)).into_response())
}

pub async fn get_cleaning_record(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let record = store.get_cleaning_record(id).await?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

pub async fn create_cleaning_record(
    Extension(store): Extension<DynStore>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CleaningPayload>,
) -> Result<Response, ApiError> {
    // Records always start out pending, whatever the payload says.
    let (fields, _) = validate(payload)?;
    let record = store.create_cleaning_record(fields).await?;

    let input = ActivityInput {
        user: user.name.clone(),
        kind: "cleaning_recorded".to_string(),
        description: format!("Recorded cleaning of {}", record.area),
        subject_type: Some("cleaning_record".to_string()),
        subject_id: Some(record.id),
    };
    if let Err(e) = store.record_activity(input).await {
        tracing::warn!("failed to record activity: {e}");
    }

    Ok((StatusCode::CREATED, Json(record)).into_response())
}

pub async fn update_cleaning_record(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
    Json(payload): Json<CleaningPayload>,
) -> Result<Response, ApiError> {
    let (fields, status) = validate(payload)?;
    let status = status.ok_or(ApiError::MissingFields(vec!["status"]))?;
    let record = store.replace_cleaning_record(id, fields, status).await?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

pub async fn delete_cleaning_record(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    store.delete_cleaning_record(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Cleaning record deleted"})),
    )
        .into_response())
}
