//! User identifier value object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// 128-bit user identifier. The nil UUID stands for "absent/anonymous".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the canonical textual form
    pub fn parse(raw: &str) -> DomainResult<Self> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidUserId(raw.to_string()))
    }

    /// The "absent" sentinel
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UserId> for Uuid {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        assert!(UserId::default().is_zero());
        assert!(UserId::nil().is_zero());
    }

    #[test]
    fn test_parse_zero_form() {
        let id = UserId::parse("00000000-0000-0000-0000-000000000000").unwrap();
        assert!(id.is_zero());
        assert_eq!(id, UserId::default());
    }

    #[test]
    fn test_new_is_unique_and_non_zero() {
        let a = UserId::new();
        let b = UserId::new();
        assert!(!a.is_zero());
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_round_trip() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            UserId::parse("not-a-uuid"),
            Err(DomainError::InvalidUserId("not-a-uuid".to_string()))
        );
    }
}
