//! User role and account status enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ROLE_ADMIN, ROLE_MODERATOR, ROLE_USER, STATUS_ACTIVE, STATUS_DELETED, STATUS_PENDING,
    STATUS_SUSPENDED,
};
use crate::error::DomainError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Check if this role may moderate content
    pub fn can_moderate(&self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }

    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Moderator => ROLE_MODERATOR,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_MODERATOR => Ok(Role::Moderator),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Pending,
    Active,
    Suspended,
    Deleted,
}

impl UserStatus {
    /// Only active accounts may authenticate
    pub fn can_login(&self) -> bool {
        matches!(self, UserStatus::Active)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, UserStatus::Deleted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => STATUS_PENDING,
            UserStatus::Active => STATUS_ACTIVE,
            UserStatus::Suspended => STATUS_SUSPENDED,
            UserStatus::Deleted => STATUS_DELETED,
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(UserStatus::Pending),
            STATUS_ACTIVE => Ok(UserStatus::Active),
            STATUS_SUSPENDED => Ok(UserStatus::Suspended),
            STATUS_DELETED => Ok(UserStatus::Deleted),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{is_valid_role, is_valid_status, VALID_ROLES, VALID_STATUSES};

    #[test]
    fn test_role_round_trip() {
        for raw in VALID_ROLES {
            let role: Role = raw.parse().unwrap();
            assert_eq!(role.to_string(), *raw);
            assert!(is_valid_role(raw));
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(DomainError::InvalidRole("superuser".to_string()))
        );
        // Exact match only
        assert!("Admin".parse::<Role>().is_err());
        assert!(!is_valid_role("Admin"));
    }

    #[test]
    fn test_role_predicates() {
        assert!(!Role::User.can_moderate());
        assert!(Role::Moderator.can_moderate());
        assert!(Role::Admin.can_moderate());
        assert!(!Role::Moderator.is_admin());
        assert!(Role::Admin.is_admin());
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_status_round_trip() {
        for raw in VALID_STATUSES {
            let status: UserStatus = raw.parse().unwrap();
            assert_eq!(status.as_str(), *raw);
            assert!(is_valid_status(raw));
        }
        assert!("banned".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_only_active_can_login() {
        assert!(UserStatus::Active.can_login());
        assert!(!UserStatus::Pending.can_login());
        assert!(!UserStatus::Suspended.can_login());
        assert!(!UserStatus::Deleted.can_login());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Moderator).unwrap(), "\"moderator\"");
        let status: UserStatus = serde_json::from_str("\"suspended\"").unwrap();
        assert_eq!(status, UserStatus::Suspended);
    }
}
