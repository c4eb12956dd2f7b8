//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Role allowed to moderate community content
pub const ROLE_MODERATOR: &str = "moderator";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_MODERATOR, ROLE_ADMIN];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// User Status
// =============================================================================

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_SUSPENDED: &str = "suspended";
pub const STATUS_DELETED: &str = "deleted";

/// All valid status values
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_ACTIVE,
    STATUS_SUSPENDED,
    STATUS_DELETED,
];

/// Check if a status value is valid
pub fn is_valid_status(status: &str) -> bool {
    VALID_STATUSES.contains(&status)
}

// =============================================================================
// Validation
// =============================================================================

/// Maximum email length after normalization
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Minimum username length
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Maximum password length (bounds the hashing cost of a single request)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum display name length
pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Maximum bio length
pub const MAX_BIO_LENGTH: usize = 500;

// =============================================================================
// Credential Hashing (Argon2id)
// =============================================================================

/// PHC algorithm identifier
pub const HASH_ALGORITHM: &str = "argon2id";

/// Argon2 version 0x13
pub const ARGON2_VERSION: u32 = 19;

/// Number of passes over memory
pub const ARGON2_TIME_COST: u32 = 2;

/// Memory cost in KiB (64 MiB)
pub const ARGON2_MEMORY_KIB: u32 = 65_536;

/// Degree of parallelism (lanes)
pub const ARGON2_PARALLELISM: u32 = 4;

/// Derived key length in bytes
pub const ARGON2_KEY_LENGTH: usize = 32;

/// Salt length in bytes
pub const ARGON2_SALT_LENGTH: usize = 16;

/// Stored hashes may use at most this multiple of each current cost parameter
pub const MAX_STORED_COST_FACTOR: u32 = 4;

/// Largest memory cost accepted from a stored hash (256 MiB)
pub const MAX_STORED_MEMORY_KIB: u32 = ARGON2_MEMORY_KIB * MAX_STORED_COST_FACTOR;

/// Largest number of passes accepted from a stored hash
pub const MAX_STORED_TIME_COST: u32 = ARGON2_TIME_COST * MAX_STORED_COST_FACTOR;

/// Largest parallelism accepted from a stored hash
pub const MAX_STORED_PARALLELISM: u32 = ARGON2_PARALLELISM * MAX_STORED_COST_FACTOR;

/// Largest derived key accepted from a stored hash
pub const MAX_STORED_KEY_LENGTH: usize = ARGON2_KEY_LENGTH * MAX_STORED_COST_FACTOR as usize;

/// Number of `$`-delimited fields in an encoded hash (leading empty field included)
pub const ENCODED_HASH_FIELDS: usize = 6;
