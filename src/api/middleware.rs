use std::sync::Arc;

use axum::{
    extract::Request,
    http::{HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tower_cookies::Cookies;

use crate::auth::{self, AuthUser, PermissionTable};
use crate::store::DynStore;

pub const SESSION_COOKIE: &str = "shelterdesk_user";

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Unauthorized"})),
    )
        .into_response()
}

/// Resolves the session cookie to an [`AuthUser`] and stashes it in the
/// request extensions for handlers and the permission guard.
pub async fn auth_middleware(cookies: Cookies, mut request: Request, next: Next) -> Response {
    let user_id = cookies
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<i32>().ok());
    let Some(user_id) = user_id else {
        return unauthorized();
    };

    // The store extension is layered onto the outer router, so it is
    // already present by the time this middleware runs.
    let Some(store) = request.extensions().get::<DynStore>().cloned() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "store not configured"})),
        )
            .into_response();
    };

    match store.load_auth_user(user_id).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => unauthorized(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

/// Guard for the management routes: maps the HTTP method onto a
/// `<resource>.<action>` permission and checks it against the static table.
pub async fn check_permission(resource: &'static str, request: Request, next: Next) -> Response {
    let method = request.method();
    let action = if method == Method::GET {
        "view"
    } else if method == Method::POST {
        "create"
    } else if method == Method::PUT || method == Method::PATCH {
        "edit"
    } else if method == Method::DELETE {
        "delete"
    } else {
        "view"
    };
    let permission = format!("{resource}.{action}");

    let table = request.extensions().get::<Arc<PermissionTable>>().cloned();
    let user = request.extensions().get::<AuthUser>();
    let allowed = table
        .as_deref()
        .map_or(false, |table| auth::has_permission(user, table, &permission));

    if allowed {
        next.run(request).await
    } else {
        (
            StatusCode::FORBIDDEN,
            Json(json!({"error": format!("Missing permission: {permission}")})),
        )
            .into_response()
    }
}

/// Tags every response with an `x-request-id` header for log correlation.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let id = uuid::Uuid::new_v4().to_string();
    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
