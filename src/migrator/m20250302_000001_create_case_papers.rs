use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CasePapers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CasePapers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CasePapers::Date).date().not_null())
                    .col(ColumnDef::new(CasePapers::AdmissionDate).date())
                    .col(ColumnDef::new(CasePapers::CaseNo).string())
                    .col(ColumnDef::new(CasePapers::InformerName).string().not_null())
                    .col(ColumnDef::new(CasePapers::Phone).string().not_null())
                    .col(ColumnDef::new(CasePapers::AltPhone).string())
                    .col(ColumnDef::new(CasePapers::Aadhar).string())
                    .col(ColumnDef::new(CasePapers::Location).string())
                    .col(ColumnDef::new(CasePapers::AnimalType).string().not_null())
                    .col(ColumnDef::new(CasePapers::AnimalName).string())
                    .col(ColumnDef::new(CasePapers::Gender).string().not_null())
                    .col(ColumnDef::new(CasePapers::Age).integer())
                    .col(ColumnDef::new(CasePapers::History).text())
                    .col(ColumnDef::new(CasePapers::Symptoms).text())
                    .col(ColumnDef::new(CasePapers::Treatment).text().not_null())
                    .col(ColumnDef::new(CasePapers::ByWhom).string().not_null())
                    .col(
                        ColumnDef::new(CasePapers::Status)
                            .string()
                            .default("active")
                            .not_null(),
                    )
                    .col(ColumnDef::new(CasePapers::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(CasePapers::UpdatedAt).date_time().not_null())
                    .col(ColumnDef::new(CasePapers::DeletedAt).date_time())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_case_papers_status")
                    .table(CasePapers::Table)
                    .col(CasePapers::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CasePapers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CasePapers {
    Table,
    Id,
    Date,
    AdmissionDate,
    CaseNo,
    InformerName,
    Phone,
    AltPhone,
    Aadhar,
    Location,
    AnimalType,
    AnimalName,
    Gender,
    Age,
    History,
    Symptoms,
    Treatment,
    ByWhom,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
