//! Email value object.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_EMAIL_LENGTH;
use crate::denylist::{self, Denylist};
use crate::error::{DomainError, DomainResult};

/// Simplified address grammar, applied after lowercasing.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$").expect("Invalid email regex pattern")
});

/// Normalized (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalize a raw address against the active denylist.
    pub fn new(raw: &str) -> DomainResult<Self> {
        Self::new_with(raw, &denylist::active().disposable_email_domains)
    }

    /// Validate and normalize a raw address against an explicit denylist.
    pub fn new_with(raw: &str, disposable_domains: &dyn Denylist) -> DomainResult<Self> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::EmailEmpty);
        }
        if normalized.chars().count() > MAX_EMAIL_LENGTH {
            return Err(DomainError::EmailTooLong);
        }
        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(DomainError::EmailInvalid);
        }

        let email = Self(normalized);
        if disposable_domains.contains(email.domain()) {
            return Err(DomainError::EmailDisposable);
        }

        Ok(email)
    }

    /// Build without validation to reach states `new` can't produce.
    #[cfg(test)]
    pub(crate) fn unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Everything after the `@`
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or_default()
    }

    /// Everything before the `@`
    pub fn local_part(&self) -> &str {
        self.0.rsplit_once('@').map(|(l, _)| l).unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
