use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde_json::json;

use crate::auth::AuthUser;
use crate::store::{ActivityInput, CasePaperFields, DynStore};

use super::{ApiError, RequiredFields};

const STATUSES: [&str; 3] = ["active", "discharged", "deceased"];

#[derive(serde::Deserialize)]
pub struct CasePaperPayload {
    date: Option<NaiveDate>,
    admission_date: Option<NaiveDate>,
    case_no: Option<String>,
    informer_name: Option<String>,
    phone: Option<String>,
    alt_phone: Option<String>,
    aadhar: Option<String>,
    location: Option<String>,
    animal_type: Option<String>,
    animal_name: Option<String>,
    gender: Option<String>,
    age: Option<i32>,
    history: Option<String>,
    symptoms: Option<String>,
    treatment: Option<String>,
    by_whom: Option<String>,
    status: Option<String>,
}

/// Collects every missing required field before touching the store, so a
/// bad submission gets one 400 naming them all and writes nothing.
fn validate(payload: CasePaperPayload) -> Result<(CasePaperFields, Option<String>), ApiError> {
    let mut required = RequiredFields::new();
    let date = required.required("date", payload.date);
    let informer_name = required.string("informer_name", payload.informer_name);
    let phone = required.string("phone", payload.phone);
    let animal_type = required.string("animal_type", payload.animal_type);
    let gender = required.string("gender", payload.gender);
    let treatment = required.string("treatment", payload.treatment);
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
        CasePaperFields {
            date,
            admission_date: payload.admission_date,
            case_no: payload.case_no,
            informer_name,
            phone,
            alt_phone: payload.alt_phone,
            aadhar: payload.aadhar,
            location: payload.location,
            animal_type,
            animal_name: payload.animal_name,
            gender,
            age: payload.age,
            history: payload.history,
            symptoms: payload.symptoms,
            treatment,
            by_whom,
        },
        payload.status,
    ))
}

#[derive(serde::Deserialize)]
pub struct ListQuery {
    status: Option<String>,
}

pub async fn list_case_papers(
    Extension(store): Extension<DynStore>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let papers = store.list_case_papers(query.status).await?;
    Ok((StatusCode::OK, Json(json!({ "data": papers }))).into_response())
}

pub async fn get_case_paper(
    Extension(store): Extension<DynStore>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let paper = store.get_case_paper(id).await?;
    Ok((StatusCode::OK, Json(paper)).into_response())
}

pub async fn create_case_paper(
    Extension(store): Extension<DynStore>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CasePaperPayload>,
) -> Result<Response, ApiError> {
    let (fields, _) = validate(payload)?;
    let animal = fields
        .animal_name
        .clone()
        .unwrap_or_else(|| fields.animal_type.clone());
    let paper = store.create_case_paper(fields).await?;

    record(
        &store,
        &user,
        "case_created",
        format!("Created a new case for {animal}"),
        paper.id,
    )
    .await;

    Ok((StatusCode::CREATED, Json(paper)).into_response())
}

pub async fn update_case_paper(
    Extension(store): Extension<DynStore>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(payload): Json<CasePaperPayload>,
) -> Result<Response, ApiError> {
    // Full-replace update: the status travels with the rest of the fields.
    let (fields, status) = validate(payload)?;
    let status = status.ok_or(ApiError::MissingFields(vec!["status"]))?;
    let paper = store.replace_case_paper(id, fields, status).await?;

    record(
        &store,
        &user,
        "case_updated",
        format!("Updated case paper #{id}"),
        id,
    )
    .await;

    Ok((StatusCode::OK, Json(paper)).into_response())
}

pub async fn delete_case_paper(
    Extension(store): Extension<DynStore>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    store.delete_case_paper(id).await?;

    record(
        &store,
        &user,
        "case_deleted",
        format!("Deleted case paper #{id}"),
        id,
    )
    .await;

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Case paper deleted"})),
    )
        .into_response())
}

async fn record(store: &DynStore, user: &AuthUser, kind: &str, description: String, id: i32) {
    let input = ActivityInput {
        user: user.name.clone(),
        kind: kind.to_string(),
        description,
        subject_type: Some("case_paper".to_string()),
        subject_id: Some(id),
    };
    if let Err(e) = store.record_activity(input).await {
        tracing::warn!("failed to record activity: {e}");
    }
}
