use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_cookies::{Cookie, Cookies};

use crate::auth::AuthUser;
use crate::store::{DynStore, NewUser};

use super::middleware::SESSION_COOKIE;
use super::{ApiError, RequiredFields};

pub(crate) fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ApiError::Internal("Failed to hash password".to_string()))
}

#[derive(serde::Deserialize)]
pub struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone: Option<String>,
}

pub async fn register(
    Extension(store): Extension<DynStore>,
    Json(payload): Json<RegisterRequest>,
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

    tracing::info!(user_id = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

#[derive(serde::Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

pub async fn login(
    Extension(store): Extension<DynStore>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let mut required = RequiredFields::new();
    let email = required.string("email", payload.email);
    let password = required.string("password", payload.password);
    required.check()?;

    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| ApiError::Internal("Invalid password hash in DB".to_string()))?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::info!(user_email = %email, "login rejected");
        return Err(ApiError::InvalidCredentials);
    }

    let mut cookie = Cookie::new(SESSION_COOKIE, user.id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);

    let role = store
        .load_auth_user(user.id)
        .await?
        .and_then(|u| u.role);

    tracing::info!(user_id = user.id, "user logged in");
    Ok((
        StatusCode::OK,
        Json(json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "role": role,
        })),
    )
        .into_response())
}

pub async fn logout(cookies: Cookies) -> Response {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookies.remove(cookie);
    (StatusCode::OK, Json(json!({"message": "Logged out"}))).into_response()
}

pub async fn me(Extension(user): Extension<AuthUser>) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "role": user.role,
        })),
    )
        .into_response()
}
