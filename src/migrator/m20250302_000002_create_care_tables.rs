use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MenuItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenuItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MenuItems::Name).string().not_null())
                    .col(ColumnDef::new(MenuItems::Category).string())
                    .col(ColumnDef::new(MenuItems::Description).text())
                    .col(ColumnDef::new(MenuItems::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(MenuItems::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeedingRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedingRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeedingRecords::CasePaperId).integer())
                    .col(
                        ColumnDef::new(FeedingRecords::FedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeedingRecords::MorningMenuId).integer())
                    .col(ColumnDef::new(FeedingRecords::MorningValue).integer())
                    .col(ColumnDef::new(FeedingRecords::EveningMenuId).integer())
                    .col(ColumnDef::new(FeedingRecords::EveningValue).integer())
                    .col(ColumnDef::new(FeedingRecords::ByWhom).string().not_null())
                    .col(ColumnDef::new(FeedingRecords::Notes).text())
                    .col(
                        ColumnDef::new(FeedingRecords::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedingRecords::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feeding_records_case_paper")
                            .from(FeedingRecords::Table, FeedingRecords::CasePaperId)
                            .to(CasePapers::Table, CasePapers::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feeding_records_fed_at")
                    .table(FeedingRecords::Table)
                    .col(FeedingRecords::FedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CleaningRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CleaningRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CleaningRecords::Area).string().not_null())
                    .col(
                        ColumnDef::new(CleaningRecords::CleanedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CleaningRecords::ByWhom).string().not_null())
                    .col(ColumnDef::new(CleaningRecords::Notes).text())
                    .col(
                        ColumnDef::new(CleaningRecords::Status)
                            .string()
                            .default("pending")
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CleaningRecords::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CleaningRecords::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CleaningRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeedingRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MenuItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MenuItems {
    Table,
    Id,
    Name,
    Category,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeedingRecords {
    Table,
    Id,
    CasePaperId,
    FedAt,
    MorningMenuId,
    MorningValue,
    EveningMenuId,
    EveningValue,
    ByWhom,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CleaningRecords {
    Table,
    Id,
    Area,
    CleanedAt,
    ByWhom,
    Notes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CasePapers {
    Table,
    Id,
}
