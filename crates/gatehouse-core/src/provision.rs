//! Default role grant policy.
//!
//! Computed as a pure function over the permission catalog so the
//! policy is testable without a store. The resulting id sets are
//! written atomically by the provisioning transaction.

use uuid::Uuid;

use crate::models::permission::Permission;

/// Keys withheld from ADMIN. Everything else in the catalog is
/// granted — allow by default, deny by exception, so future catalog
/// entries reach ADMIN without a code change.
pub const ADMIN_DENIED_KEYS: &[&str] = &["project:delete"];

/// The only keys granted to MEMBER. Everything else is withheld by
/// default.
pub const MEMBER_GRANTED_KEYS: &[&str] = &["project:read", "task:read"];

/// Permission ids to grant to each default role of a new project.
#[derive(Debug, Clone, Default)]
pub struct DefaultGrants {
    /// OWNER receives the full catalog.
    pub owner: Vec<Uuid>,
    /// ADMIN receives the catalog minus [`ADMIN_DENIED_KEYS`].
    pub admin: Vec<Uuid>,
    /// MEMBER receives exactly [`MEMBER_GRANTED_KEYS`].
    pub member: Vec<Uuid>,
}

/// Compute the grant sets for the three default roles from the
/// current permission catalog.
pub fn default_grants(catalog: &[Permission]) -> DefaultGrants {
    DefaultGrants {
        owner: catalog.iter().map(|p| p.id).collect(),
        admin: catalog
            .iter()
            .filter(|p| !ADMIN_DENIED_KEYS.contains(&p.key.as_str()))
            .map(|p| p.id)
            .collect(),
        member: catalog
            .iter()
            .filter(|p| MEMBER_GRANTED_KEYS.contains(&p.key.as_str()))
            .map(|p| p.id)
            .collect(),
    }
}
