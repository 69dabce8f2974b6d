//! Role/permission model.
//!
//! Permissions are flat strings of the form `<resource>.<action>`
//! (`users.view`, `roles.edit`, ...). Case-paper permissions are special:
//! every authenticated user holds all of them, whatever their role.

use std::collections::{HashMap, HashSet};

/// The authenticated caller, resolved by the auth middleware from the
/// session cookie. `role` is the name of the user's assigned role, if any.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

/// Static role -> permission grants, built once at startup and handed to the
/// router as shared state rather than living as a module constant.
#[derive(Clone, Debug, Default)]
pub struct PermissionTable {
    grants: HashMap<String, HashSet<String>>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, role: &str, permissions: &[&str]) -> Self {
        self.grants
            .entry(role.to_string())
            .or_default()
            .extend(permissions.iter().map(|p| p.to_string()));
        self
    }

    /// The shelter's stock table: `admin` gets the full management set,
    /// `staff` a read-only subset.
    pub fn shelter_defaults() -> Self {
        Self::new()
            .grant(
                "admin",
                &[
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
                ],
            )
            .grant("staff", &["users.view", "roles.view", "settings.view"])
    }

    pub fn role_has(&self, role: &str, permission: &str) -> bool {
        self.grants
            .get(role)
            .map_or(false, |set| set.contains(permission))
    }
}

/// Pure authorization check: no user means no access; case-paper
/// permissions are granted to any authenticated user; everything else is
/// looked up in the static table for the user's role.
pub fn has_permission(user: Option<&AuthUser>, table: &PermissionTable, permission: &str) -> bool {
    let Some(user) = user else {
        return false;
    };

    if permission.starts_with("case_papers.") {
        return true;
    }

    user.role
        .as_deref()
        .map_or(false, |role| table.role_has(role, permission))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<&str>) -> AuthUser {
        AuthUser {
            id: 1,
            name: "Jane Doe".to_string(),
            email: "jane@shelter.org".to_string(),
            role: role.map(|r| r.to_string()),
        }
    }

    #[test]
    fn no_user_is_denied_everything() {
        let table = PermissionTable::shelter_defaults();
        assert!(!has_permission(None, &table, "case_papers.view"));
        assert!(!has_permission(None, &table, "users.view"));
    }

    #[test]
    fn case_paper_permissions_granted_to_any_authenticated_user() {
        let table = PermissionTable::shelter_defaults();
        for perm in [
            "case_papers.view",
            "case_papers.create",
            "case_papers.edit",
            "case_papers.delete",
        ] {
            assert!(has_permission(Some(&user(Some("staff"))), &table, perm));
            assert!(has_permission(Some(&user(Some("admin"))), &table, perm));
            // Even a user with no role at all gets case-paper access.
            assert!(has_permission(Some(&user(None)), &table, perm));
        }
    }

    #[test]
    fn staff_denied_permissions_outside_their_list() {
        let table = PermissionTable::shelter_defaults();
        let staff = user(Some("staff"));
        assert!(has_permission(Some(&staff), &table, "users.view"));
        assert!(!has_permission(Some(&staff), &table, "users.create"));
        assert!(!has_permission(Some(&staff), &table, "users.delete"));
        assert!(!has_permission(Some(&staff), &table, "roles.edit"));
        assert!(!has_permission(Some(&staff), &table, "settings.edit"));
    }

    #[test]
    fn admin_holds_the_full_management_set() {
        let table = PermissionTable::shelter_defaults();
        let admin = user(Some("admin"));
        for perm in ["users.delete", "roles.create", "settings.edit"] {
            assert!(has_permission(Some(&admin), &table, perm));
        }
        // Unknown permissions are still denied, admin is not a wildcard.
        assert!(!has_permission(Some(&admin), &table, "inventory.reorder"));
    }

    #[test]
    fn unknown_role_is_denied_table_permissions() {
        let table = PermissionTable::shelter_defaults();
        let vol = user(Some("volunteer"));
        assert!(!has_permission(Some(&vol), &table, "users.view"));
        assert!(has_permission(Some(&vol), &table, "case_papers.view"));
    }
}
