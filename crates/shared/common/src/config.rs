//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Base service configuration shared by all binaries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "user-service".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Optional external sources for the domain denylists.
///
/// Each file is a newline-separated list; `None` keeps the built-in table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DenylistConfig {
    pub disposable_email_domains_file: Option<String>,
    pub reserved_usernames_file: Option<String>,
    pub weak_passwords_file: Option<String>,
}

impl DenylistConfig {
    /// True when no external list is configured
    pub fn is_builtin(&self) -> bool {
        self.disposable_email_domains_file.is_none()
            && self.reserved_usernames_file.is_none()
            && self.weak_passwords_file.is_none()
    }
}
