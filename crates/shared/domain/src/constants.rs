//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Person Roles
// =============================================================================

/// Role for people donating goods or money
pub const ROLE_DONOR: &str = "donor";

/// Role for suppliers fulfilling requests
pub const ROLE_VENDOR: &str = "vendor";

/// Role for people requesting relief
pub const ROLE_VICTIM: &str = "victim";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_DONOR, ROLE_VENDOR, ROLE_VICTIM];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Listing
// =============================================================================

/// Number of records returned when only `skip` is supplied
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Upper bound on a single page
pub const MAX_PAGE_LIMIT: u64 = 100;
