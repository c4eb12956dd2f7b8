//! User service configuration.

use std::env;
use std::fs;

use common::{AppError, AppResult, DenylistConfig, ServiceConfig};
use domain::{denylist, Denylists, StaticDenylist};

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Service name and log level
    pub service: ServiceConfig,
    /// External denylist sources
    pub denylists: DenylistConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables (and `.env`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = ServiceConfig::default();
        Self {
            service: ServiceConfig {
                service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
                log_level: env::var("USER_SERVICE_LOG_LEVEL")
                    .or_else(|_| env::var("LOG_LEVEL"))
                    .unwrap_or(defaults.log_level),
            },
            denylists: DenylistConfig {
                disposable_email_domains_file: non_empty_var("DISPOSABLE_EMAIL_DOMAINS_FILE"),
                reserved_usernames_file: non_empty_var("RESERVED_USERNAMES_FILE"),
                weak_passwords_file: non_empty_var("WEAK_PASSWORDS_FILE"),
            },
        }
    }

    /// Build the denylists, reading any configured files.
    ///
    /// Lists without a file keep the built-in table.
    pub fn load_denylists(&self) -> AppResult<Denylists> {
        let builtin = Denylists::default();
        let config = &self.denylists;

        Ok(Denylists {
            disposable_email_domains: load_list(
                config.disposable_email_domains_file.as_deref(),
                builtin.disposable_email_domains,
            )?,
            reserved_usernames: load_list(
                config.reserved_usernames_file.as_deref(),
                builtin.reserved_usernames,
            )?,
            weak_passwords: load_list(
                config.weak_passwords_file.as_deref(),
                builtin.weak_passwords,
            )?,
        })
    }

    /// Make the configured denylists the process-wide ones.
    ///
    /// Must run before the first value object is validated.
    pub fn install_denylists(&self) -> AppResult<()> {
        if self.denylists.is_builtin() {
            tracing::debug!("Using built-in denylists");
            return Ok(());
        }

        let lists = self.load_denylists()?;
        tracing::info!(
            disposable_domains = lists.disposable_email_domains.len(),
            reserved_usernames = lists.reserved_usernames.len(),
            weak_passwords = lists.weak_passwords.len(),
            "Installing external denylists"
        );
        denylist::install(lists)
            .map_err(|_| AppError::internal("Denylists were already initialized"))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn load_list(path: Option<&str>, fallback: StaticDenylist) -> AppResult<StaticDenylist> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| AppError::internal(format!("Failed to read {}: {}", path, e)))?;
            Ok(StaticDenylist::from_lines(&text))
        }
        None => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Denylist;

    #[test]
    fn test_defaults_use_builtin_lists() {
        let config = UserServiceConfig::default();
        assert!(config.denylists.is_builtin());

        let lists = config.load_denylists().unwrap();
        assert!(lists.reserved_usernames.contains("admin"));
    }

    #[test]
    fn test_loads_list_from_file() {
        let path = env::temp_dir().join(format!("reserved-{}.txt", std::process::id()));
        fs::write(&path, "# team names\nacme\nAcmeSupport\n").unwrap();

        let config = UserServiceConfig {
            denylists: DenylistConfig {
                reserved_usernames_file: Some(path.to_string_lossy().into_owned()),
                ..DenylistConfig::default()
            },
            ..UserServiceConfig::default()
        };
        let lists = config.load_denylists().unwrap();
        fs::remove_file(&path).ok();

        assert!(lists.reserved_usernames.contains("ACME"));
        assert!(lists.reserved_usernames.contains("acmesupport"));
        assert!(!lists.reserved_usernames.contains("admin"));
        // Unconfigured lists keep the built-in entries
        assert!(lists.weak_passwords.contains("password1234"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let config = UserServiceConfig {
            denylists: DenylistConfig {
                weak_passwords_file: Some("/nonexistent/weak.txt".to_string()),
                ..DenylistConfig::default()
            },
            ..UserServiceConfig::default()
        };
        assert!(matches!(
            config.load_denylists(),
            Err(AppError::Internal(_))
        ));
    }
}
