use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock counter with a display threshold. `minimum_level` drives the
/// low-stock dashboard count only, there is no reorder automation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: String,
    pub current_stock: i32,
    pub minimum_level: i32,
    pub unit: String,
    pub last_restocked: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
