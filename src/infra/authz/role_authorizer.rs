use crate::domain::ports::{Authorizer, Capability};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_SUPERVISOR: &str = "supervisor";

/// Static role-to-capability map. Roles are asserted by the gateway in
/// request headers; unknown roles hold no capabilities.
pub struct RoleAuthorizer;

impl RoleAuthorizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RoleAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Authorizer for RoleAuthorizer {
    fn can(&self, role: &str, capability: Capability) -> bool {
        match role {
            ROLE_ADMIN => true,
            ROLE_MANAGER => !matches!(capability, Capability::ReopenOutOfSequence),
            ROLE_SUPERVISOR => matches!(
                capability,
                Capability::ApproveTimeEntries | Capability::ClosePeriod
            ),
            _ => false,
        }
    }
}
