use std::sync::Arc;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use shelterdesk_server::auth::PermissionTable;
use shelterdesk_server::config::Config;
use shelterdesk_server::migrator::Migrator;
use shelterdesk_server::store::{DynStore, SeaOrmStore};

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("invalid configuration");

    shelterdesk_server::telemetry::init_telemetry("shelterdesk-server");

    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let store: DynStore = Arc::new(SeaOrmStore::new(db));
    let permissions = Arc::new(PermissionTable::shelter_defaults());

    let app = shelterdesk_server::app::build_router(store, permissions, &config.cors_origin);

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("server error");
}
