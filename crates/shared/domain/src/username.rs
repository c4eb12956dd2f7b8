//! Username value object.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH};
use crate::denylist::{self, Denylist};
use crate::error::{DomainError, DomainResult};

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("Invalid username regex pattern"));

/// Trimmed, case-preserving username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate a raw username against the active reserved-name list.
    pub fn new(raw: &str) -> DomainResult<Self> {
        Self::new_with(raw, &denylist::active().reserved_usernames)
    }

    /// Validate a raw username against an explicit reserved-name list.
    pub fn new_with(raw: &str, reserved: &dyn Denylist) -> DomainResult<Self> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();

        if trimmed.is_empty() {
            return Err(DomainError::UsernameEmpty);
        }
        if length < MIN_USERNAME_LENGTH {
            return Err(DomainError::UsernameTooShort);
        }
        if length > MAX_USERNAME_LENGTH {
            return Err(DomainError::UsernameTooLong);
        }
        if !USERNAME_PATTERN.is_match(trimmed) {
            return Err(DomainError::UsernameInvalid);
        }
        if reserved.contains(trimmed) {
            return Err(DomainError::UsernameReserved);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Build without validation to reach states `new` can't produce.
    #[cfg(test)]
    pub(crate) fn unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for uniqueness lookups
    pub fn canonical(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_validates() {
        let username: Username = serde_json::from_str("\" Alice_99 \"").unwrap();
        assert_eq!(username.as_str(), "Alice_99");
        assert!(serde_json::from_str::<Username>("\"root\"").is_err());
        assert!(serde_json::from_str::<Username>("\"\"").is_err());
    }

    #[test]
    fn test_trims_and_preserves_case() {
        let username = Username::new("  Alice_99 ").unwrap();
        assert_eq!(username.as_str(), "Alice_99");
        assert_eq!(username.canonical(), "alice_99");
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(Username::new(""), Err(DomainError::UsernameEmpty));
        assert_eq!(Username::new("  "), Err(DomainError::UsernameEmpty));
        assert_eq!(Username::new("ab"), Err(DomainError::UsernameTooShort));
        assert!(Username::new("abc").is_ok());
        assert!(Username::new(&"a".repeat(32)).is_ok());
        assert_eq!(
            Username::new(&"a".repeat(33)),
            Err(DomainError::UsernameTooLong)
        );
    }

    #[test]
    fn test_charset() {
        for raw in ["bad-name", "bad name", "bad.name", "naïve_user"] {
            assert_eq!(Username::new(raw), Err(DomainError::UsernameInvalid), "{raw}");
        }
    }

    #[test]
    fn test_reserved_is_case_insensitive() {
        assert_eq!(Username::new("admin"), Err(DomainError::UsernameReserved));
        assert_eq!(Username::new("Admin"), Err(DomainError::UsernameReserved));
        assert_eq!(Username::new("ROOT"), Err(DomainError::UsernameReserved));
    }

    #[test]
    fn test_length_checked_before_reserved() {
        // "mod" is reserved and exactly 3 chars; "ap" would be too short first
        assert_eq!(Username::new("mod"), Err(DomainError::UsernameReserved));
        assert_eq!(Username::new("ap"), Err(DomainError::UsernameTooShort));
    }
}
