use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    routing::{get, post, put},
    Extension, Router,
};

use crate::api;
use crate::auth::PermissionTable;
use crate::store::DynStore;

async fn health_check() -> &'static str {
    "OK"
}

/// Assembles the full application router around whatever store adapter the
/// caller hands in. The binary wires up the sea-orm adapter; tests wire up
/// the same adapter over in-memory SQLite.
pub fn build_router(store: DynStore, permissions: Arc<PermissionTable>, cors_origin: &str) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/register", post(api::auth::register))
        .route("/api/auth/login", post(api::auth::login));

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/me", get(api::auth::me))
        .route(
            "/api/case-papers",
            get(api::case_papers::list_case_papers).post(api::case_papers::create_case_paper),
        )
        .route(
            "/api/case-papers/:id",
            get(api::case_papers::get_case_paper)
                .put(api::case_papers::update_case_paper)
                .delete(api::case_papers::delete_case_paper),
        )
        .route(
            "/api/feeding",
            get(api::feeding::list_feeding_records).post(api::feeding::create_feeding_record),
        )
        .route(
            "/api/feeding/:id",
            get(api::feeding::get_feeding_record)
                .put(api::feeding::update_feeding_record)
                .delete(api::feeding::delete_feeding_record),
        )
        .route(
            "/api/cleaning",
            get(api::cleaning::list_cleaning_records).post(api::cleaning::create_cleaning_record),
        )
        .route(
            "/api/cleaning/:id",
            get(api::cleaning::get_cleaning_record)
                .put(api::cleaning::update_cleaning_record)
                .delete(api::cleaning::delete_cleaning_record),
        )
        .route(
            "/api/menu",
            get(api::menu::list_menu_items).post(api::menu::create_menu_item),
        )
        .route(
            "/api/menu/:id",
            get(api::menu::get_menu_item)
                .put(api::menu::update_menu_item)
                .delete(api::menu::delete_menu_item),
        )
        .route(
            "/api/inventory",
            get(api::inventory::list_inventory_items).post(api::inventory::create_inventory_item),
        )
        .route(
            "/api/inventory/:id",
            get(api::inventory::get_inventory_item)
                .put(api::inventory::update_inventory_item)
                .delete(api::inventory::delete_inventory_item),
        )
        .route("/api/dashboard/stats", get(api::dashboard::stats))
        .route("/api/activities/recent", get(api::activities::recent));

    let user_admin_routes = Router::new()
        .route(
            "/api/users",
            get(api::users::list_users).post(api::users::create_user),
        )
        .route(
            "/api/users/:id",
            get(api::users::get_user)
                .put(api::users::update_user)
                .delete(api::users::delete_user),
        )
        .route("/api/users/:id/role", put(api::users::assign_role))
        .route_layer(from_fn(|req: Request, next: Next| {
            api::middleware::check_permission("users", req, next)
        }));

    let role_admin_routes = Router::new()
        .route(
            "/api/roles",
            get(api::roles::list_roles).post(api::roles::create_role),
        )
        .route(
            "/api/roles/:id",
            get(api::roles::get_role).delete(api::roles::delete_role),
        )
        .route(
            "/api/roles/:id/permissions",
            get(api::roles::role_permissions).put(api::roles::replace_role_permissions),
        )
        .route("/api/permissions", get(api::roles::list_permissions))
        .route_layer(from_fn(|req: Request, next: Next| {
            api::middleware::check_permission("roles", req, next)
        }));

    let protected_routes = protected_routes
        .merge(user_admin_routes)
        .merge(role_admin_routes)
        .route_layer(from_fn(api::middleware::auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(store))
        .layer(Extension(permissions))
        .layer(tower_cookies::CookieManagerLayer::new())
        .layer(from_fn(api::middleware::request_id_middleware))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str());
                    let route = matched_path.unwrap_or_else(|| request.uri().path());

                    tracing::info_span!(
                        "request",
                        method = ?request.method(),
                        route = route,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(build_cors(cors_origin))
}

fn build_cors(origin: &str) -> tower_http::cors::CorsLayer {
    let mut cors = tower_http::cors::CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);
    if let Ok(origin) = origin.parse::<axum::http::HeaderValue>() {
        cors = cors.allow_origin(origin);
    }
    cors
}
