//! CLI command implementations.

use std::io::{self, BufRead};

use common::{AppError, AppResult};
use domain::{Email, PasswordHash, Username};

use crate::cli::Commands;

/// Run a command and return the text to print.
pub fn execute(command: Commands) -> AppResult<String> {
    match command {
        Commands::HashPassword { password } => {
            let password = password_or_stdin(password)?;
            let hash = PasswordHash::new(&password)?;
            Ok(hash.into_string())
        }
        Commands::VerifyPassword { hash, password } => {
            let password = password_or_stdin(password)?;
            PasswordHash::parse(&hash)?.verify(&password)?;
            Ok("Password matches".to_string())
        }
        Commands::CheckEmail { email } => Ok(Email::new(&email)?.into()),
        Commands::CheckUsername { username } => Ok(Username::new(&username)?.into()),
    }
}

fn password_or_stdin(password: Option<String>) -> AppResult<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| AppError::internal(format!("Failed to read stdin: {}", e)))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;

    #[test]
    fn test_check_email_normalizes() {
        let output = execute(Commands::CheckEmail {
            email: " User@Example.COM ".to_string(),
        })
        .unwrap();
        assert_eq!(output, "user@example.com");
    }

    #[test]
    fn test_check_username_reports_reserved() {
        let err = execute(Commands::CheckUsername {
            username: "Root".to_string(),
        })
        .unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::UsernameReserved));
    }

    #[test]
    fn test_hash_then_verify() {
        let password = "a long enough passphrase".to_string();
        let hash = execute(Commands::HashPassword {
            password: Some(password.clone()),
        })
        .unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=65536,t=2,p=4$"));

        let verified = execute(Commands::VerifyPassword {
            hash: hash.clone(),
            password: Some(password),
        });
        assert!(verified.is_ok());

        let mismatch = execute(Commands::VerifyPassword {
            hash,
            password: Some("another long passphrase".to_string()),
        })
        .unwrap_err();
        assert_eq!(mismatch.code(), "INVALID_CREDENTIALS");
    }

    #[test]
    fn test_verify_malformed_hash() {
        let err = execute(Commands::VerifyPassword {
            hash: "not-a-hash".to_string(),
            password: Some("whatever it is".to_string()),
        })
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_HASH_FORMAT");
    }
}
