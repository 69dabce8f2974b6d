use chrono::NaiveDateTime;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::auth::AuthUser;
use crate::entities::{
    activity, case_paper, cleaning_record, feeding_record, inventory_item, menu_item, permission,
    role, user, user_role,
    prelude::*,
};

use super::{
    ActivityInput, CasePaperFields, CleaningFields, DashboardStats, FeedingFields,
    InventoryFields, MenuFields, NewUser, ShelterStore, StoreError, UserFields, UserRecord,
};

/// sea-orm adapter for [`ShelterStore`]. Works against whatever backend the
/// connection was opened on (Postgres in deployment, SQLite in tests).
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

// Postgres wording and SQLite wording respectively.
fn is_unique_violation(err: &DbErr) -> bool {
    let msg = err.to_string();
    msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

fn user_record(model: user::Model, role: Option<String>) -> UserRecord {
    UserRecord {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait::async_trait]
impl ShelterStore for SeaOrmStore {
    async fn list_case_papers(
        &self,
        status: Option<String>,
    ) -> Result<Vec<case_paper::Model>, StoreError> {
        let mut query = CasePaper::find().filter(case_paper::Column::DeletedAt.is_null());
        if let Some(status) = status {
            query = query.filter(case_paper::Column::Status.eq(status));
        }
        Ok(query
            .order_by_desc(case_paper::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn get_case_paper(&self, id: i32) -> Result<case_paper::Model, StoreError> {
        CasePaper::find_by_id(id)
            .filter(case_paper::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("Case paper"))
    }

    async fn create_case_paper(
        &self,
        fields: CasePaperFields,
    ) -> Result<case_paper::Model, StoreError> {
        let ts = now();
        let model = case_paper::ActiveModel {
            date: Set(fields.date),
            admission_date: Set(fields.admission_date),
            case_no: Set(fields.case_no),
            informer_name: Set(fields.informer_name),
            phone: Set(fields.phone),
            alt_phone: Set(fields.alt_phone),
            aadhar: Set(fields.aadhar),
            location: Set(fields.location),
            animal_type: Set(fields.animal_type),
            animal_name: Set(fields.animal_name),
            gender: Set(fields.gender),
            age: Set(fields.age),
            history: Set(fields.history),
            symptoms: Set(fields.symptoms),
            treatment: Set(fields.treatment),
            by_whom: Set(fields.by_whom),
            status: Set("active".to_string()),
            created_at: Set(ts),
            updated_at: Set(ts),
            deleted_at: Set(None),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn replace_case_paper(
        &self,
        id: i32,
        fields: CasePaperFields,
        status: String,
    ) -> Result<case_paper::Model, StoreError> {
        let paper = self.get_case_paper(id).await?;
        let mut active = paper.into_active_model();
        active.date = Set(fields.date);
        active.admission_date = Set(fields.admission_date);
        active.case_no = Set(fields.case_no);
        active.informer_name = Set(fields.informer_name);
        active.phone = Set(fields.phone);
        active.alt_phone = Set(fields.alt_phone);
        active.aadhar = Set(fields.aadhar);
        active.location = Set(fields.location);
        active.animal_type = Set(fields.animal_type);
        active.animal_name = Set(fields.animal_name);
        active.gender = Set(fields.gender);
        active.age = Set(fields.age);
        active.history = Set(fields.history);
        active.symptoms = Set(fields.symptoms);
        active.treatment = Set(fields.treatment);
        active.by_whom = Set(fields.by_whom);
        active.status = Set(status);
        active.updated_at = Set(now());
        Ok(active.update(&self.db).await?)
    }

    async fn delete_case_paper(&self, id: i32) -> Result<(), StoreError> {
        let paper = self.get_case_paper(id).await?;
        let mut active = paper.into_active_model();
        let ts = now();
        active.deleted_at = Set(Some(ts));
        active.updated_at = Set(ts);
        active.update(&self.db).await?;
        Ok(())
    }

    async fn list_feeding_records(&self) -> Result<Vec<feeding_record::Model>, StoreError> {
        Ok(FeedingRecord::find()
            .order_by_desc(feeding_record::Column::FedAt)
            .all(&self.db)
            .await?)
    }

    async fn get_feeding_record(&self, id: i32) -> Result<feeding_record::Model, StoreError> {
        FeedingRecord::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("Feeding record"))
    }

    async fn create_feeding_record(
        &self,
        fields: FeedingFields,
    ) -> Result<feeding_record::Model, StoreError> {
        let ts = now();
        let model = feeding_record::ActiveModel {
            case_paper_id: Set(fields.case_paper_id),
            fed_at: Set(fields.fed_at),
            morning_menu_id: Set(fields.morning_menu_id),
            morning_value: Set(fields.morning_value),
            evening_menu_id: Set(fields.evening_menu_id),
            evening_value: Set(fields.evening_value),
            by_whom: Set(fields.by_whom),
            notes: Set(fields.notes),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn replace_feeding_record(
        &self,
        id: i32,
        fields: FeedingFields,
    ) -> Result<feeding_record::Model, StoreError> {
        let record = self.get_feeding_record(id).await?;
        let mut active = record.into_active_model();
        active.case_paper_id = Set(fields.case_paper_id);
        active.fed_at = Set(fields.fed_at);
        active.morning_menu_id = Set(fields.morning_menu_id);
        active.morning_value = Set(fields.morning_value);
        active.evening_menu_id = Set(fields.evening_menu_id);
        active.evening_value = Set(fields.evening_value);
        active.by_whom = Set(fields.by_whom);
        active.notes = Set(fields.notes);
        active.updated_at = Set(now());
        Ok(active.update(&self.db).await?)
    }

    async fn delete_feeding_record(&self, id: i32) -> Result<(), StoreError> {
        let res = FeedingRecord::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found("Feeding record"));
        }
        Ok(())
    }

    async fn list_cleaning_records(&self) -> Result<Vec<cleaning_record::Model>, StoreError> {
        Ok(CleaningRecord::find()
            .order_by_desc(cleaning_record::Column::CleanedAt)
            .all(&self.db)
            .await?)
    }

    async fn get_cleaning_record(&self, id: i32) -> Result<cleaning_record::Model, StoreError> {
        CleaningRecord::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("Cleaning record"))
    }

    async fn create_cleaning_record(
        &self,
        fields: CleaningFields,
    ) -> Result<cleaning_record::Model, StoreError> {
        let ts = now();
        let model = cleaning_record::ActiveModel {
            area: Set(fields.area),
            cleaned_at: Set(fields.cleaned_at),
            by_whom: Set(fields.by_whom),
            notes: Set(fields.notes),
            status: Set("pending".to_string()),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn replace_cleaning_record(
        &self,
        id: i32,
        fields: CleaningFields,
        status: String,
    ) -> Result<cleaning_record::Model, StoreError> {
        let record = self.get_cleaning_record(id).await?;
        let mut active = record.into_active_model();
        active.area = Set(fields.area);
        active.cleaned_at = Set(fields.cleaned_at);
        active.by_whom = Set(fields.by_whom);
        active.notes = Set(fields.notes);
        active.status = Set(status);
        active.updated_at = Set(now());
        Ok(active.update(&self.db).await?)
    }

    async fn delete_cleaning_record(&self, id: i32) -> Result<(), StoreError> {
        let res = CleaningRecord::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found("Cleaning record"));
        }
        Ok(())
    }

    async fn list_menu_items(&self) -> Result<Vec<menu_item::Model>, StoreError> {
        Ok(MenuItem::find()
            .order_by_asc(menu_item::Column::Name)
            .all(&self.db)
            .await?)
    }

    async fn get_menu_item(&self, id: i32) -> Result<menu_item::Model, StoreError> {
        MenuItem::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("Menu item"))
    }

    async fn create_menu_item(&self, fields: MenuFields) -> Result<menu_item::Model, StoreError> {
        let ts = now();
        let model = menu_item::ActiveModel {
            name: Set(fields.name),
            category: Set(fields.category),
            description: Set(fields.description),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn replace_menu_item(
        &self,
        id: i32,
        fields: MenuFields,
    ) -> Result<menu_item::Model, StoreError> {
        let item = self.get_menu_item(id).await?;
        let mut active = item.into_active_model();
        active.name = Set(fields.name);
        active.category = Set(fields.category);
        active.description = Set(fields.description);
        active.updated_at = Set(now());
        Ok(active.update(&self.db).await?)
    }

    async fn delete_menu_item(&self, id: i32) -> Result<(), StoreError> {
        let res = MenuItem::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found("Menu item"));
        }
        Ok(())
    }

    async fn list_inventory_items(&self) -> Result<Vec<inventory_item::Model>, StoreError> {
        Ok(InventoryItem::find()
            .order_by_asc(inventory_item::Column::Name)
            .all(&self.db)
            .await?)
    }

    async fn get_inventory_item(&self, id: i32) -> Result<inventory_item::Model, StoreError> {
        InventoryItem::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("Inventory item"))
    }

    async fn create_inventory_item(
        &self,
        fields: InventoryFields,
    ) -> Result<inventory_item::Model, StoreError> {
        let ts = now();
        let model = inventory_item::ActiveModel {
            name: Set(fields.name),
            category: Set(fields.category),
            current_stock: Set(fields.current_stock),
            minimum_level: Set(fields.minimum_level),
            unit: Set(fields.unit),
            last_restocked: Set(Some(ts)),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn replace_inventory_item(
        &self,
        id: i32,
        fields: InventoryFields,
    ) -> Result<inventory_item::Model, StoreError> {
        let item = self.get_inventory_item(id).await?;
        let restocked = fields.current_stock > item.current_stock;
        let mut active = item.into_active_model();
        active.name = Set(fields.name);
        active.category = Set(fields.category);
        active.current_stock = Set(fields.current_stock);
        active.minimum_level = Set(fields.minimum_level);
        active.unit = Set(fields.unit);
        let ts = now();
        if restocked {
            active.last_restocked = Set(Some(ts));
        }
        active.updated_at = Set(ts);
        Ok(active.update(&self.db).await?)
    }

    async fn delete_inventory_item(&self, id: i32) -> Result<(), StoreError> {
        let res = InventoryItem::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found("Inventory item"));
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = User::find()
            .find_with_related(Role)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(u, roles)| {
                let role = roles.into_iter().next().map(|r| r.name);
                user_record(u, role)
            })
            .collect())
    }

    async fn get_user(&self, id: i32) -> Result<UserRecord, StoreError> {
        let user = User::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("User"))?;
        let role = user.find_related(Role).one(&self.db).await?;
        Ok(user_record(user, role.map(|r| r.name)))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, StoreError> {
        Ok(User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        let ts = now();
        let model = user::ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            phone: Set(new_user.phone),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };
        match model.insert(&self.db).await {
            Ok(user) => Ok(user_record(user, None)),
            Err(e) if is_unique_violation(&e) => {
                Err(StoreError::Conflict("Email already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_user(&self, id: i32, fields: UserFields) -> Result<UserRecord, StoreError> {
        let user = User::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("User"))?;
        let mut active = user.into_active_model();
        active.name = Set(fields.name);
        active.email = Set(fields.email);
        active.phone = Set(fields.phone);
        active.updated_at = Set(now());
        let user = match active.update(&self.db).await {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                return Err(StoreError::Conflict("Email already exists".to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let role = user.find_related(Role).one(&self.db).await?;
        Ok(user_record(user, role.map(|r| r.name)))
    }

    async fn delete_user(&self, id: i32) -> Result<(), StoreError> {
        let res = User::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found("User"));
        }
        Ok(())
    }

    /// Replace-then-assign, in one transaction so the user never ends up
    /// roleless if the insert fails.
    async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<(), StoreError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("User"))?;
        Role::find_by_id(role_id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("Role"))?;

        let txn = self.db.begin().await?;
        UserRole::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;
        UserRole::insert(user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
        })
        .exec(&txn)
        .await?;
        txn.commit().await?;
        Ok(())
    }

    async fn load_auth_user(&self, id: i32) -> Result<Option<AuthUser>, StoreError> {
        let Some(user) = User::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let role = user.find_related(Role).one(&self.db).await?;
        Ok(Some(AuthUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: role.map(|r| r.name),
        }))
    }

    async fn list_roles(&self) -> Result<Vec<role::Model>, StoreError> {
        Ok(Role::find()
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await?)
    }

    async fn get_role(&self, id: i32) -> Result<role::Model, StoreError> {
        Role::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::not_found("Role"))
    }

    async fn create_role(&self, name: String) -> Result<role::Model, StoreError> {
        let ts = now();
        let model = role::ActiveModel {
            name: Set(name),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };
        match model.insert(&self.db).await {
            Ok(role) => Ok(role),
            Err(e) if is_unique_violation(&e) => {
                Err(StoreError::Conflict("Role name already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_role(&self, id: i32) -> Result<(), StoreError> {
        let res = Role::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found("Role"));
        }
        Ok(())
    }

    async fn list_permissions(&self) -> Result<Vec<permission::Model>, StoreError> {
        Ok(Permission::find()
            .order_by_asc(permission::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn role_permissions(&self, role_id: i32) -> Result<Vec<permission::Model>, StoreError> {
        let role = self.get_role(role_id).await?;
        Ok(role
            .find_related(Permission)
            .order_by_asc(permission::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Wholesale replacement of a role's grants, in one transaction so a
    /// failure cannot strand the role half-updated.
    async fn replace_role_permissions(
        &self,
        role_id: i32,
        permission_ids: Vec<i32>,
    ) -> Result<(), StoreError> {
        self.get_role(role_id).await?;

        let txn = self.db.begin().await?;
        crate::entities::RolePermission::delete_many()
            .filter(crate::entities::role_permission::Column::RoleId.eq(role_id))
            .exec(&txn)
            .await?;
        if !permission_ids.is_empty() {
            let rows = permission_ids
                .into_iter()
                .map(|pid| crate::entities::role_permission::ActiveModel {
                    role_id: Set(role_id),
                    permission_id: Set(pid),
                });
            crate::entities::RolePermission::insert_many(rows)
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn record_activity(&self, input: ActivityInput) -> Result<(), StoreError> {
        let model = activity::ActiveModel {
            user: Set(input.user),
            kind: Set(input.kind),
            description: Set(input.description),
            subject_type: Set(input.subject_type),
            subject_id: Set(input.subject_id),
            created_at: Set(now()),
            ..Default::default()
        };
        model.insert(&self.db).await?;
        Ok(())
    }

    async fn recent_activities(&self, limit: u64) -> Result<Vec<activity::Model>, StoreError> {
        Ok(Activity::find()
            .order_by_desc(activity::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError> {
        let total_cases = CasePaper::find()
            .filter(case_paper::Column::DeletedAt.is_null())
            .count(&self.db)
            .await?;
        let active_cases = CasePaper::find()
            .filter(case_paper::Column::DeletedAt.is_null())
            .filter(case_paper::Column::Status.eq("active"))
            .count(&self.db)
            .await?;
        let pending_cleanings = CleaningRecord::find()
            .filter(cleaning_record::Column::Status.eq("pending"))
            .count(&self.db)
            .await?;
        let midnight = chrono::Utc::now().date_naive().and_time(chrono::NaiveTime::MIN);
        let feedings_today = FeedingRecord::find()
            .filter(feeding_record::Column::FedAt.gte(midnight))
            .count(&self.db)
            .await?;
        let low_inventory_items = InventoryItem::find()
            .filter(
                Expr::col(inventory_item::Column::CurrentStock)
                    .lt(Expr::col(inventory_item::Column::MinimumLevel)),
            )
            .count(&self.db)
            .await?;

        Ok(DashboardStats {
            total_cases,
            active_cases,
            pending_cleanings,
            feedings_today,
            low_inventory_items,
        })
    }
}
