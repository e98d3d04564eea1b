//! Well-known role name constants.
//!
//! These must match the role names the backend returns on `GET /users`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_SALES_REP: &str = "sales_rep";

/// Returns `true` if users with this role may be chosen as assignment targets.
///
/// Admins administer the CRM and never own leads.
pub fn is_assignable_role(role: &str) -> bool {
    role != ROLE_ADMIN
}
