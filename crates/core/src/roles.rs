//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in the initial
//! migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Every role accepted by the `users.role` column.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Check whether a role string is one of the known roles.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_valid_role(ROLE_ADMIN));
        assert!(is_valid_role(ROLE_USER));
    }

    #[test]
    fn unknown_roles_are_rejected() {
        assert!(!is_valid_role("creator"));
        assert!(!is_valid_role(""));
        assert!(!is_valid_role("ADMIN"));
    }
}
