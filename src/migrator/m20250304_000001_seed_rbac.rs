use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// The static permission catalog. Case-paper permissions are listed so the
/// roles page can display them, even though the authorization check grants
/// them to every authenticated user.
const PERMISSIONS: [&str; 14] = [
    "case_papers.view",
    "case_papers.create",
    "case_papers.edit",
    "case_papers.delete",
    "users.view",
    "users.create",
    "users.edit",
    "users.delete",
    "roles.view",
    "roles.create",
    "roles.edit",
    "roles.delete",
    "settings.view",
    "settings.edit",
];

const ADMIN_GRANTS: [&str; 10] = [
    "users.view",
    "users.create",
    "users.edit",
    "users.delete",
    "roles.view",
    "roles.create",
    "roles.edit",
    "roles.delete",
    "settings.view",
    "settings.edit",
];

const STAFF_GRANTS: [&str; 3] = ["users.view", "roles.view", "settings.view"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut roles = Query::insert();
        roles
            .into_table(Roles::Table)
            .columns([Roles::Name, Roles::CreatedAt, Roles::UpdatedAt]);
        for name in ["admin", "staff"] {
            roles.values_panic([
                name.into(),
                Expr::current_timestamp().into(),
                Expr::current_timestamp().into(),
            ]);
        }
        manager.exec_stmt(roles.to_owned()).await?;

        let mut permissions = Query::insert();
        permissions
            .into_table(Permissions::Table)
            .columns([Permissions::Name]);
        for name in PERMISSIONS {
            permissions.values_panic([name.into()]);
        }
        manager.exec_stmt(permissions.to_owned()).await?;

        grant(manager, "admin", &ADMIN_GRANTS).await?;
        grant(manager, "staff", &STAFF_GRANTS).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(RolePermissions::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Permissions::Table).to_owned())
            .await?;
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Roles::Table)
                    .and_where(Expr::col(Roles::Name).is_in(["admin", "staff"]))
                    .to_owned(),
            )
            .await
    }
}

/// Insert role_permissions join rows by name lookup, so the seed never
/// depends on concrete auto-increment ids.
async fn grant(manager: &SchemaManager<'_>, role: &str, grants: &[&str]) -> Result<(), DbErr> {
    let select = Query::select()
        .column((Roles::Table, Roles::Id))
        .column((Permissions::Table, Permissions::Id))
        .from(Roles::Table)
        .from(Permissions::Table)
        .and_where(Expr::col((Roles::Table, Roles::Name)).eq(role))
        .and_where(Expr::col((Permissions::Table, Permissions::Name)).is_in(grants.iter().copied()))
        .to_owned();

    let mut insert = Query::insert();
    insert
        .into_table(RolePermissions::Table)
        .columns([RolePermissions::RoleId, RolePermissions::PermissionId]);
    insert
        .select_from(select)
        .map_err(|e| DbErr::Custom(e.to_string()))?;

    manager.exec_stmt(insert.to_owned()).await
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Permissions {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum RolePermissions {
    Table,
    RoleId,
    PermissionId,
}
