pub mod activity;
pub mod case_paper;
pub mod cleaning_record;
pub mod feeding_record;
pub mod inventory_item;
pub mod menu_item;
pub mod permission;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod user_role;

pub use activity::Entity as Activity;
pub use case_paper::Entity as CasePaper;
pub use cleaning_record::Entity as CleaningRecord;
pub use feeding_record::Entity as FeedingRecord;
pub use inventory_item::Entity as InventoryItem;
pub use menu_item::Entity as MenuItem;
pub use permission::Entity as Permission;
pub use role::Entity as Role;
pub use role_permission::Entity as RolePermission;
pub use user::Entity as User;
pub use user_role::Entity as UserRole;

pub mod prelude;
