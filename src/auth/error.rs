use thiserror::Error;

use crate::store::StoreError;

/// Failures of the authentication and authorization core.
///
/// None of these are retried; the transport boundary maps them to status
/// codes (see `AppError`).
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identity or wrong password. The two are reported identically.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// Registration for an email that is already registered.
    #[error("email is already registered")]
    IdentityAlreadyExists,
    /// A validly signed token names a principal that no longer resolves.
    #[error("token subject is not a registered user")]
    UnknownPrincipal,
    /// Bad signature, wrong algorithm, or a token of the wrong class.
    #[error("invalid token")]
    TokenInvalid,
    /// Correctly signed but past its expiry.
    #[error("token has expired")]
    TokenExpired,
    /// Not structurally a token: bad encoding, bad JSON, missing claims.
    #[error("malformed token")]
    TokenMalformed,
    /// The password is longer than bcrypt can hash without truncating it.
    #[error("password must be at most 72 bytes")]
    PasswordTooLong,
    /// The caller does not own the resource.
    #[error("you do not have permission to access this resource")]
    Forbidden,
    /// A stored credential hash could not be parsed.
    #[error("stored credential is malformed: {0}")]
    CredentialError(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("internal error: {0}")]
    Internal(String),
}
