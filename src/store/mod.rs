//! Persistence interface.
//!
//! All business handlers talk to [`ShelterStore`]; the concrete adapter is
//! picked at startup (currently the sea-orm adapter, driving Postgres or
//! SQLite depending on `DATABASE_URL`). Keeping the interface here means the
//! validation and replace semantics live in exactly one place no matter
//! which backend is wired in.

mod sea_orm_store;

pub use sea_orm_store::SeaOrmStore;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthUser;
use crate::entities::{activity, case_paper, cleaning_record, feeding_record, inventory_item,
    menu_item, permission, role};

pub type DynStore = Arc<dyn ShelterStore>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}

/// Validated case-paper fields. Create defaults `status` to `active`;
/// replace takes the status alongside (full-replace semantics, no partial
/// patch).
#[derive(Clone, Debug)]
pub struct CasePaperFields {
    pub date: NaiveDate,
    pub admission_date: Option<NaiveDate>,
    pub case_no: Option<String>,
    pub informer_name: String,
    pub phone: String,
    pub alt_phone: Option<String>,
    pub aadhar: Option<String>,
    pub location: Option<String>,
    pub animal_type: String,
    pub animal_name: Option<String>,
    pub gender: String,
    pub age: Option<i32>,
    pub history: Option<String>,
    pub symptoms: Option<String>,
    pub treatment: String,
    pub by_whom: String,
}

#[derive(Clone, Debug)]
pub struct FeedingFields {
    pub case_paper_id: Option<i32>,
    pub fed_at: NaiveDateTime,
    pub morning_menu_id: Option<i32>,
    pub morning_value: Option<i32>,
    pub evening_menu_id: Option<i32>,
    pub evening_value: Option<i32>,
    pub by_whom: String,
    pub notes: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CleaningFields {
    pub area: String,
    pub cleaned_at: NaiveDateTime,
    pub by_whom: String,
    pub notes: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MenuFields {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct InventoryFields {
    pub name: String,
    pub category: String,
    pub current_stock: i32,
    pub minimum_level: i32,
    pub unit: String,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// User row as the API exposes it: no password hash, role name joined in.
#[derive(Clone, Debug, Serialize)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct ActivityInput {
    pub user: String,
    pub kind: String,
    pub description: String,
    pub subject_type: Option<String>,
    pub subject_id: Option<i32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DashboardStats {
    pub total_cases: u64,
    pub active_cases: u64,
    pub pending_cleanings: u64,
    pub feedings_today: u64,
    pub low_inventory_items: u64,
}

#[async_trait::async_trait]
pub trait ShelterStore: Send + Sync {
    // case papers (soft delete)
    async fn list_case_papers(
        &self,
        status: Option<String>,
    ) -> Result<Vec<case_paper::Model>, StoreError>;
    async fn get_case_paper(&self, id: i32) -> Result<case_paper::Model, StoreError>;
    async fn create_case_paper(
        &self,
        fields: CasePaperFields,
    ) -> Result<case_paper::Model, StoreError>;
    async fn replace_case_paper(
        &self,
        id: i32,
        fields: CasePaperFields,
        status: String,
    ) -> Result<case_paper::Model, StoreError>;
    async fn delete_case_paper(&self, id: i32) -> Result<(), StoreError>;

    // feeding
    async fn list_feeding_records(&self) -> Result<Vec<feeding_record::Model>, StoreError>;
    async fn get_feeding_record(&self, id: i32) -> Result<feeding_record::Model, StoreError>;
    async fn create_feeding_record(
        &self,
        fields: FeedingFields,
    ) -> Result<feeding_record::Model, StoreError>;
    async fn replace_feeding_record(
        &self,
        id: i32,
        fields: FeedingFields,
    ) -> Result<feeding_record::Model, StoreError>;
    async fn delete_feeding_record(&self, id: i32) -> Result<(), StoreError>;

    // cleaning
    async fn list_cleaning_records(&self) -> Result<Vec<cleaning_record::Model>, StoreError>;
    async fn get_cleaning_record(&self, id: i32) -> Result<cleaning_record::Model, StoreError>;
    async fn create_cleaning_record(
        &self,
        fields: CleaningFields,
    ) -> Result<cleaning_record::Model, StoreError>;
    async fn replace_cleaning_record(
        &self,
        id: i32,
        fields: CleaningFields,
        status: String,
    ) -> Result<cleaning_record::Model, StoreError>;
    async fn delete_cleaning_record(&self, id: i32) -> Result<(), StoreError>;

    // menu
    async fn list_menu_items(&self) -> Result<Vec<menu_item::Model>, StoreError>;
    async fn get_menu_item(&self, id: i32) -> Result<menu_item::Model, StoreError>;
    async fn create_menu_item(&self, fields: MenuFields) -> Result<menu_item::Model, StoreError>;
    async fn replace_menu_item(
        &self,
        id: i32,
        fields: MenuFields,
    ) -> Result<menu_item::Model, StoreError>;
    async fn delete_menu_item(&self, id: i32) -> Result<(), StoreError>;

    // inventory
    async fn list_inventory_items(&self) -> Result<Vec<inventory_item::Model>, StoreError>;
    async fn get_inventory_item(&self, id: i32) -> Result<inventory_item::Model, StoreError>;
    async fn create_inventory_item(
        &self,
        fields: InventoryFields,
    ) -> Result<inventory_item::Model, StoreError>;
    async fn replace_inventory_item(
        &self,
        id: i32,
        fields: InventoryFields,
    ) -> Result<inventory_item::Model, StoreError>;
    async fn delete_inventory_item(&self, id: i32) -> Result<(), StoreError>;

    // users and role assignment
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;
    async fn get_user(&self, id: i32) -> Result<UserRecord, StoreError>;
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<crate::entities::user::Model>, StoreError>;
    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord, StoreError>;
    async fn update_user(&self, id: i32, fields: UserFields) -> Result<UserRecord, StoreError>;
    async fn delete_user(&self, id: i32) -> Result<(), StoreError>;
    async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<(), StoreError>;
    async fn load_auth_user(&self, id: i32) -> Result<Option<AuthUser>, StoreError>;

    // roles and permissions
    async fn list_roles(&self) -> Result<Vec<role::Model>, StoreError>;
    async fn get_role(&self, id: i32) -> Result<role::Model, StoreError>;
    async fn create_role(&self, name: String) -> Result<role::Model, StoreError>;
    async fn delete_role(&self, id: i32) -> Result<(), StoreError>;
    async fn list_permissions(&self) -> Result<Vec<permission::Model>, StoreError>;
    async fn role_permissions(&self, role_id: i32) -> Result<Vec<permission::Model>, StoreError>;
    async fn replace_role_permissions(
        &self,
        role_id: i32,
        permission_ids: Vec<i32>,
    ) -> Result<(), StoreError>;

    // activity feed and dashboard
    async fn record_activity(&self, input: ActivityInput) -> Result<(), StoreError>;
    async fn recent_activities(&self, limit: u64) -> Result<Vec<activity::Model>, StoreError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError>;
}
