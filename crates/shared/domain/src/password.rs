//! Password hash value object - Domain layer credential handling.
//!
//! Derives and verifies Argon2id credentials in PHC string form:
//! `$argon2id$v=19$m=65536,t=2,p=4$<salt>$<key>` (base64, no padding).
//! Plaintext is never stored.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PhcError, PasswordHash as PhcHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::constants::{
    ARGON2_KEY_LENGTH, ARGON2_MEMORY_KIB, ARGON2_PARALLELISM, ARGON2_TIME_COST, ARGON2_VERSION,
    ENCODED_HASH_FIELDS, HASH_ALGORITHM, MAX_PASSWORD_LENGTH, MAX_STORED_KEY_LENGTH,
    MAX_STORED_MEMORY_KIB, MAX_STORED_PARALLELISM, MAX_STORED_TIME_COST, MIN_PASSWORD_LENGTH,
};
use crate::denylist::{self, Denylist};
use crate::error::{DomainError, DomainResult};

/// Encoded Argon2id credential.
///
/// `Default` is the empty hash, which never verifies.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordHash {
    encoded: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHash")
            .field("encoded", &"[REDACTED]")
            .finish()
    }
}

impl PasswordHash {
    /// Check the password policy and hash the plaintext with a fresh salt.
    ///
    /// Checks run in order: empty, too short, too long, weak. A short password
    /// that is also on the weak list reports `PasswordTooShort`.
    ///
    /// # Errors
    /// Returns the first policy violation, or `Hashing` if the KDF fails.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::new_with(plain_text, &denylist::active().weak_passwords)
    }

    /// Same as [`PasswordHash::new`] with an explicit weak-password list.
    pub fn new_with(plain_text: &str, weak_passwords: &dyn Denylist) -> DomainResult<Self> {
        Self::check_policy(plain_text, weak_passwords)?;
        let encoded = Self::hash(plain_text)?;
        Ok(Self { encoded })
    }

    /// Structural validation of a stored hash (field count and algorithm).
    ///
    /// Used when hydrating from storage; the password policy is not re-checked.
    pub fn parse(encoded: &str) -> DomainResult<Self> {
        let fields: Vec<&str> = encoded.split('$').collect();
        if fields.len() != ENCODED_HASH_FIELDS {
            return Err(DomainError::InvalidHashFormat);
        }
        if fields[1] != HASH_ALGORITHM {
            return Err(DomainError::UnsupportedHashAlgorithm(fields[1].to_string()));
        }

        Ok(Self {
            encoded: encoded.to_string(),
        })
    }

    /// Verify a plaintext against this hash.
    ///
    /// The key is recomputed with the salt and cost parameters stored in the
    /// encoding. The derived-key comparison is constant-time, and any mismatch
    /// is reported as `PasswordMismatch` with no further detail.
    ///
    /// # Errors
    /// - `PasswordHashEmpty` if there is no stored hash
    /// - `InvalidHashFormat` if the stored encoding cannot be decoded or its
    ///   cost parameters exceed the accepted bounds
    /// - `PasswordMismatch` if the plaintext is wrong
    pub fn verify(&self, plain_text: &str) -> DomainResult<()> {
        if self.is_empty() {
            return Err(DomainError::PasswordHashEmpty);
        }

        let parsed = PhcHash::new(&self.encoded).map_err(|_| DomainError::InvalidHashFormat)?;
        if parsed.algorithm.as_str() != HASH_ALGORITHM {
            return Err(DomainError::UnsupportedHashAlgorithm(
                parsed.algorithm.as_str().to_string(),
            ));
        }
        check_stored_params(&parsed)?;

        // Output equality inside verify_password is constant-time.
        match Argon2::default().verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(PhcError::Password) => Err(DomainError::PasswordMismatch),
            Err(_) => Err(DomainError::InvalidHashFormat),
        }
    }

    /// Whether the hash was produced with parameters other than the current ones.
    pub fn needs_rehash(&self) -> bool {
        !self.encoded.starts_with(&current_prefix())
    }

    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    /// Get the encoded string for storage.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Consume and return the encoded string.
    pub fn into_string(self) -> String {
        self.encoded
    }

    fn check_policy(plain_text: &str, weak_passwords: &dyn Denylist) -> DomainResult<()> {
        let length = plain_text.chars().count();

        if plain_text.is_empty() {
            return Err(DomainError::PasswordEmpty);
        }
        if length < MIN_PASSWORD_LENGTH {
            return Err(DomainError::PasswordTooShort);
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(DomainError::PasswordTooLong);
        }
        if weak_passwords.contains(plain_text) {
            return Err(DomainError::PasswordWeak);
        }

        Ok(())
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Argon2id with the fixed cost parameters.
    fn argon2() -> DomainResult<Argon2<'static>> {
        let params = Params::new(
            ARGON2_MEMORY_KIB,
            ARGON2_TIME_COST,
            ARGON2_PARALLELISM,
            Some(ARGON2_KEY_LENGTH),
        )
        .map_err(|e| DomainError::Hashing(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Reject stored cost parameters that would make verification exhaust memory or time.
fn check_stored_params(parsed: &PhcHash<'_>) -> DomainResult<()> {
    let params = Params::try_from(parsed).map_err(|_| DomainError::InvalidHashFormat)?;
    let key_length = parsed.hash.as_ref().map_or(0, |hash| hash.len());

    if params.m_cost() > MAX_STORED_MEMORY_KIB
        || params.t_cost() > MAX_STORED_TIME_COST
        || params.p_cost() > MAX_STORED_PARALLELISM
        || key_length > MAX_STORED_KEY_LENGTH
    {
        return Err(DomainError::InvalidHashFormat);
    }

    Ok(())
}

fn current_prefix() -> String {
    format!(
        "${HASH_ALGORITHM}$v={ARGON2_VERSION}$m={ARGON2_MEMORY_KIB},t={ARGON2_TIME_COST},p={ARGON2_PARALLELISM}$"
    )
}

impl From<PasswordHash> for String {
    fn from(hash: PasswordHash) -> Self {
        hash.encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ARGON2_SALT_LENGTH;

    const PLAIN: &str = "correct horse battery";

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordHash::new(PLAIN).unwrap();

        assert!(hash.verify(PLAIN).is_ok());
        assert_eq!(
            hash.verify("wrong horse battery"),
            Err(DomainError::PasswordMismatch)
        );
    }

    #[test]
    fn test_encoding_format() {
        let hash = PasswordHash::new(PLAIN).unwrap();
        let fields: Vec<&str> = hash.as_str().split('$').collect();

        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0], "");
        assert_eq!(fields[1], "argon2id");
        assert_eq!(fields[2], "v=19");
        assert_eq!(fields[3], "m=65536,t=2,p=4");
        // unpadded base64: 16 bytes -> 22 chars, 32 bytes -> 43 chars
        assert_eq!(fields[4].len(), (ARGON2_SALT_LENGTH * 4).div_ceil(3));
        assert_eq!(fields[5].len(), (ARGON2_KEY_LENGTH * 4).div_ceil(3));
        assert!(!fields[4].contains('=') && !fields[5].contains('='));
        assert!(!hash.needs_rehash());
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = PasswordHash::new(PLAIN).unwrap();
        let second = PasswordHash::new(PLAIN).unwrap();

        // Different salts produce different hashes
        assert_ne!(first.as_str(), second.as_str());
        // But both verify correctly
        assert!(first.verify(PLAIN).is_ok());
        assert!(second.verify(PLAIN).is_ok());
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let hash = PasswordHash::new(PLAIN).unwrap();
        assert_eq!(
            hash.verify("Correct horse battery"),
            Err(DomainError::PasswordMismatch)
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let hash = PasswordHash::new(PLAIN).unwrap();
        let restored = PasswordHash::parse(hash.as_str()).unwrap();

        assert_eq!(restored, hash);
        assert!(restored.verify(PLAIN).is_ok());
    }

    #[test]
    fn test_policy_order() {
        assert_eq!(PasswordHash::new(""), Err(DomainError::PasswordEmpty));
        // On the weak list, but length is checked first
        assert_eq!(
            PasswordHash::new("password123"),
            Err(DomainError::PasswordTooShort)
        );
        assert_eq!(
            PasswordHash::new("password1234"),
            Err(DomainError::PasswordWeak)
        );
        assert_eq!(
            PasswordHash::new("PASSWORD1234"),
            Err(DomainError::PasswordWeak)
        );
        assert_eq!(
            PasswordHash::new(&"x".repeat(129)),
            Err(DomainError::PasswordTooLong)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(PasswordHash::parse(""), Err(DomainError::InvalidHashFormat));
        assert_eq!(
            PasswordHash::parse("$argon2id$v=19$m=65536,t=2,p=4$c2FsdA"),
            Err(DomainError::InvalidHashFormat)
        );
        assert_eq!(
            PasswordHash::parse("$argon2i$v=19$m=65536,t=2,p=4$c2FsdA$a2V5"),
            Err(DomainError::UnsupportedHashAlgorithm("argon2i".to_string()))
        );
    }

    #[test]
    fn test_verify_empty_hash() {
        let hash = PasswordHash::default();
        assert!(hash.is_empty());
        assert_eq!(hash.verify(PLAIN), Err(DomainError::PasswordHashEmpty));
    }

    #[test]
    fn test_verify_corrupted_hash_is_format_error() {
        let hash = PasswordHash::parse("$argon2id$v=19$m=lots,t=2,p=4$!!!$???").unwrap();
        assert_eq!(hash.verify(PLAIN), Err(DomainError::InvalidHashFormat));
    }

    #[test]
    fn test_verify_rejects_oversized_costs() {
        let salt = "c2FsdHNhbHRzYWx0c2FsdA";
        let key = "a2V5a2V5a2V5a2V5a2V5a2V5a2V5a2V5a2V5a2V5a2U";
        let oversized = [
            format!("$argon2id$v=19$m=4294967295,t=1,p=1${salt}${key}"),
            format!("$argon2id$v=19$m=65536,t=4000000,p=4${salt}${key}"),
            format!("$argon2id$v=19$m=65536,t=2,p=255${salt}${key}"),
        ];

        for encoded in &oversized {
            let hash = PasswordHash::parse(encoded).unwrap();
            assert_eq!(hash.verify(PLAIN), Err(DomainError::InvalidHashFormat));
        }
    }

    #[test]
    fn test_verify_accepts_older_cheaper_params() {
        let params = Params::new(19_456, 2, 1, Some(ARGON2_KEY_LENGTH)).unwrap();
        let salt = SaltString::generate(&mut OsRng);
        let encoded = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(PLAIN.as_bytes(), &salt)
            .unwrap()
            .to_string();

        let hash = PasswordHash::parse(&encoded).unwrap();
        assert!(hash.verify(PLAIN).is_ok());
        assert!(hash.needs_rehash());
    }

    #[test]
    fn test_needs_rehash_for_other_params() {
        let hash = PasswordHash::parse("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$a2V5a2V5").unwrap();
        assert!(hash.needs_rehash());
    }

    #[test]
    fn test_debug_is_redacted() {
        let hash = PasswordHash::new(PLAIN).unwrap();
        let debug = format!("{:?}", hash);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("argon2id"));
    }
}
