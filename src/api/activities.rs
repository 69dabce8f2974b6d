use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::store::DynStore;

use super::ApiError;

const RECENT_LIMIT: u64 = 20;

pub async fn recent(Extension(store): Extension<DynStore>) -> Result<Response, ApiError> {
    let activities = store.recent_activities(RECENT_LIMIT).await?;
    Ok((StatusCode::OK, Json(activities)).into_response())
}
