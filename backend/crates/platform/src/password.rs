//! Password Hashing and Verification
//!
//! - Argon2id hashing in PHC string format
//! - Zeroization of clear text passwords
//! - Constant-time comparison (inside argon2)
//! - Optional NIST SP 800-63B style policy for newly chosen passwords
//!
//! Stored credentials are only ever PHC strings. Clear text exists for the
//! duration of a single hash or verify call and is wiped on drop.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length for the strict policy
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length for the strict policy
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// PHC algorithm identifiers `argon2` can verify
const ARGON2_IDENTS: [&str; 3] = ["argon2id", "argon2i", "argon2d"];

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error("Unsupported password hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Two ways in:
/// - [`ClearTextPassword::new`] applies the length/character policy and is
///   meant for passwords being *chosen* (credential generation).
/// - [`ClearTextPassword::candidate`] is meant for passwords being
///   *checked*: a sign-in attempt must never be rejected by policy, only by
///   comparison against the stored hash.
///
/// The bytes are kept exactly as given. Credential files may come from any
/// Argon2 tool, so hashing and verifying both work on the raw UTF-8.
/// The policy counts characters on the NFKC form, so a ligature such as
/// U+FB01 counts as the two letters it stands for.
/// Not `Clone`; `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a clear text password, enforcing the policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let mut normalized: String = raw.nfkc().collect();
        let verdict = Self::check_policy(&normalized);
        normalized.zeroize();
        verdict.map(|()| Self(raw))
    }

    fn check_policy(normalized: &str) -> Result<(), PasswordPolicyError> {
        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Unicode code points, not bytes
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(())
    }

    /// Wrap a password submitted for verification, unchanged
    pub fn candidate(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id with a fresh random salt
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        // OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
        let hash = Argon2::default()
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, parameters and salt, so a
/// credential file produced on one machine verifies on another.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a PHC string, e.g. read from a credential file
    ///
    /// Only the Argon2 family is accepted. Any other algorithm would parse
    /// but could never verify.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        let parsed = PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        let algorithm = parsed.algorithm.as_str();
        if !ARGON2_IDENTS.contains(&algorithm) {
            return Err(PasswordHashError::UnsupportedAlgorithm(algorithm.to_string()));
        }

        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// CPU-bound by construction. Async callers should run this on a
    /// blocking thread and must not hold a lock across it.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
