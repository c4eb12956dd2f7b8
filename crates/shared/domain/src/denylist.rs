//! Denylists consulted by the value-object factories.
//!
//! Membership is always a case-insensitive exact match. The built-in tables
//! are used unless a different set is installed once at process start with
//! [`install`], e.g. lists loaded from files by the service configuration.

use std::collections::HashSet;

use once_cell::sync::OnceCell;

/// Lookup contract for a denylist: case-insensitive exact-match membership.
pub trait Denylist: Send + Sync {
    fn contains(&self, value: &str) -> bool;
}

/// Denylist backed by a set of lowercased entries.
#[derive(Debug, Clone, Default)]
pub struct StaticDenylist {
    entries: HashSet<String>,
}

impl StaticDenylist {
    /// Build a denylist; entries are trimmed and lowercased, blanks dropped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    /// Parse a newline-separated list. Blank lines and `#` comments are ignored.
    pub fn from_lines(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Denylist for StaticDenylist {
    fn contains(&self, value: &str) -> bool {
        self.entries.contains(&value.to_lowercase())
    }
}

/// The three process-wide lists.
#[derive(Debug, Clone)]
pub struct Denylists {
    pub disposable_email_domains: StaticDenylist,
    pub reserved_usernames: StaticDenylist,
    pub weak_passwords: StaticDenylist,
}

impl Default for Denylists {
    fn default() -> Self {
        Self {
            disposable_email_domains: StaticDenylist::new(DISPOSABLE_EMAIL_DOMAINS),
            reserved_usernames: StaticDenylist::new(RESERVED_USERNAMES),
            weak_passwords: StaticDenylist::new(WEAK_PASSWORDS),
        }
    }
}

static ACTIVE: OnceCell<Denylists> = OnceCell::new();

/// Lists used by the default factories. Falls back to the built-in tables.
pub fn active() -> &'static Denylists {
    ACTIVE.get_or_init(Denylists::default)
}

/// Install externally loaded lists.
///
/// Must run before the first validation; once the lists are initialized they
/// are read-only and the rejected set is handed back.
pub fn install(lists: Denylists) -> Result<(), Denylists> {
    ACTIVE.set(lists)
}

/// Built-in disposable email providers
pub const DISPOSABLE_EMAIL_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "dispostable.com",
    "fakeinbox.com",
    "getnada.com",
    "guerrillamail.com",
    "guerrillamail.net",
    "mailinator.com",
    "maildrop.cc",
    "mintemail.com",
    "sharklasers.com",
    "temp-mail.org",
    "tempmail.com",
    "throwawaymail.com",
    "trashmail.com",
    "yopmail.com",
];

/// Built-in reserved usernames
pub const RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "administrator",
    "anonymous",
    "api",
    "help",
    "mod",
    "moderator",
    "null",
    "official",
    "root",
    "security",
    "staff",
    "superuser",
    "support",
    "system",
    "undefined",
    "www",
];

/// Built-in list of common weak passwords
pub const WEAK_PASSWORDS: &[&str] = &[
    "000000000000",
    "111111111111",
    "123456789012",
    "1234567890ab",
    "abc123456789",
    "admin1234567",
    "changeme1234",
    "iloveyou1234",
    "letmein12345",
    "password",
    "password123",
    "password1234",
    "password12345",
    "passwordpassword",
    "qwerty123456",
    "qwertyuiop12",
    "qwertyuiopas",
    "welcome12345",
];
