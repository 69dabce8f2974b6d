use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InventoryItems::Name).string().not_null())
                    .col(ColumnDef::new(InventoryItems::Category).string().not_null())
                    .col(
                        ColumnDef::new(InventoryItems::CurrentStock)
                            .integer()
                            .default(0)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::MinimumLevel)
                            .integer()
                            .default(0)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InventoryItems::Unit).string().not_null())
                    .col(ColumnDef::new(InventoryItems::LastRestocked).date_time())
                    .col(
                        ColumnDef::new(InventoryItems::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_items_category")
                    .table(InventoryItems::Table)
                    .col(InventoryItems::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InventoryItems {
    Table,
    Id,
    Name,
    Category,
    CurrentStock,
    MinimumLevel,
    Unit,
    LastRestocked,
    CreatedAt,
    UpdatedAt,
}
