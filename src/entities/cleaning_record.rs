use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One cleaning pass over an area. `status` moves through
/// pending -> completed -> verified by explicit overwrite from the UI.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "cleaning_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub area: String,
    pub cleaned_at: DateTime,
    pub by_whom: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
