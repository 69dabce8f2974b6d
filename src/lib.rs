pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod entities;
pub mod migrator;
pub mod store;
pub mod telemetry;

pub use sea_orm;
