pub use super::activity::Entity as Activity;
pub use super::case_paper::Entity as CasePaper;
pub use super::cleaning_record::Entity as CleaningRecord;
pub use super::feeding_record::Entity as FeedingRecord;
pub use super::inventory_item::Entity as InventoryItem;
pub use super::menu_item::Entity as MenuItem;
pub use super::permission::Entity as Permission;
pub use super::role::Entity as Role;
pub use super::role_permission::Entity as RolePermission;
pub use super::user::Entity as User;
pub use super::user_role::Entity as UserRole;
