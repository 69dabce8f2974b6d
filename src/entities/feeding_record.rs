use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "feeding_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub case_paper_id: Option<i32>,
    pub fed_at: DateTime,
    pub morning_menu_id: Option<i32>,
    pub morning_value: Option<i32>,
    pub evening_menu_id: Option<i32>,
    pub evening_value: Option<i32>,
    pub by_whom: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::case_paper::Entity",
        from = "Column::CasePaperId",
        to = "super::case_paper::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    CasePaper,
}

impl Related<super::case_paper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CasePaper.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
