use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Intake/treatment record for one animal. Rows are soft-deleted:
/// `deleted_at` set means the paper is gone as far as the API is concerned.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "case_papers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    pub admission_date: Option<Date>,
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
    #[sea_orm(column_type = "Text", nullable)]
    pub history: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub symptoms: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub treatment: String,
    pub by_whom: String,
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::feeding_record::Entity")]
    FeedingRecord,
}

impl Related<super::feeding_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedingRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
