use crate::auth::error::AuthError;
use bcrypt::{hash, verify};

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;
/// bcrypt ignores everything past this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes and checks passwords. The only place plaintext passwords are compared.
///
/// bcrypt embeds a fresh random salt in every hash, so hashing the same
/// password twice gives two different strings that both verify.
#[derive(Debug, Clone, Copy)]
pub struct CredentialVerifier {
    cost: u32,
}

impl CredentialVerifier {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Fails with `PasswordTooLong` rather than hashing a truncated password.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::PasswordTooLong);
        }
        hash(password, self.cost)
            .map_err(|e| AuthError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Returns `Ok(false)` on a mismatch and `Err(CredentialError)` only when
    /// `hashed_password` is not a valid bcrypt hash. A password longer than
    /// `MAX_PASSWORD_BYTES` never matches.
    pub fn verify(&self, password: &str, hashed_password: &str) -> Result<bool, AuthError> {
        if hashed_password.is_empty() {
            return Err(AuthError::CredentialError("empty hash".into()));
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        verify(password, hashed_password).map_err(|e| AuthError::CredentialError(e.to_string()))
    }
}

impl Default for CredentialVerifier {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
