use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::models::Principal;

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 72;
/// Lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 14;

/// Which of the two token classes a token belongs to.
///
/// Carried in the signed payload so that a long-lived refresh token can never
/// be presented where an access token is expected, or the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn ttl(self) -> Duration {
        match self {
            TokenKind::Access => Duration::hours(ACCESS_TOKEN_TTL_HOURS),
            TokenKind::Refresh => Duration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }
}

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the principal's email.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token class.
    pub typ: TokenKind,
}

/// Access and refresh token returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and validates HS256-signed tokens with a single shared secret.
///
/// The secret is supplied at construction; the service holds no other state
/// and is safe to share across any number of workers.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        // Expiry is checked by hand after decoding so the boundary is exact
        // and testable against an explicit clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn issue_access_token(&self, principal: &Principal) -> Result<String, AuthError> {
        self.issue_at(principal, TokenKind::Access, Utc::now())
    }

    pub fn issue_refresh_token(&self, principal: &Principal) -> Result<String, AuthError> {
        self.issue_at(principal, TokenKind::Refresh, Utc::now())
    }

    /// Issues a token of `kind` as if the current time were `now`.
    pub fn issue_at(
        &self,
        principal: &Principal,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: principal.email.clone(),
            iat: now.timestamp(),
            exp: (now + kind.ttl()).timestamp(),
            typ: kind,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate token: {}", e)))
    }

    pub fn validate_access(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_at(token, TokenKind::Access, Utc::now())
    }

    pub fn validate_refresh(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_at(token, TokenKind::Refresh, Utc::now())
    }

    /// Validates `token` as a token of class `expected` at time `now`.
    ///
    /// The signature is verified before anything in the payload is trusted,
    /// so a tampered token is `TokenInvalid` even if it also claims to be
    /// expired. A token is valid strictly before its `exp`.
    pub fn validate_at(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify(e.kind()))?;

        if claims.typ != expected {
            return Err(AuthError::TokenInvalid);
        }
        if claims.exp <= now.timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::TokenInvalid,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::TokenMalformed,
    }
}
