pub mod error;
pub mod extractors;
pub mod guard;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use error::AuthError;
pub use extractors::AuthenticatedPrincipal;
pub use guard::{authorize, authorize_resource, OwnedResource};
pub use middleware::AuthMiddleware;
pub use password::CredentialVerifier;
pub use service::AuthService;
pub use token::{Claims, TokenKind, TokenPair, TokenService};

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password.
    #[validate(length(min = 1), custom = "validate_password_bytes")]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account; also its permanent identity.
    #[validate(email)]
    pub email: String,
    /// Password for the new account, at most 72 bytes once UTF-8 encoded.
    #[validate(length(min = 1), custom = "validate_password_bytes")]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

/// Represents the payload for exchanging a refresh token.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// bcrypt's limit is in bytes, which `length` (counting characters) can't express.
fn validate_password_bytes(value: &str) -> Result<(), ValidationError> {
    if value.len() > password::MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}
