use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::store::DynStore;

use super::ApiError;

pub async fn stats(Extension(store): Extension<DynStore>) -> Result<Response, ApiError> {
    let stats = store.dashboard_stats().await?;
    Ok((StatusCode::OK, Json(stats)).into_response())
}
