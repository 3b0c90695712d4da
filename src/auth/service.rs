use std::sync::Arc;

use log::{debug, info, warn};

use crate::auth::error::AuthError;
use crate::auth::password::CredentialVerifier;
use crate::auth::token::{TokenPair, TokenService};
use crate::models::{Principal, PrincipalView};
use crate::store::{PrincipalRegistry, StoreError};

/// Login, registration and token refresh.
///
/// Holds no per-request state; each call is a single lookup/verify/issue
/// sequence against the injected registry.
#[derive(Clone)]
pub struct AuthService {
    registry: Arc<dyn PrincipalRegistry>,
    tokens: TokenService,
    credentials: CredentialVerifier,
}

impl AuthService {
    pub fn new(
        registry: Arc<dyn PrincipalRegistry>,
        tokens: TokenService,
        credentials: CredentialVerifier,
    ) -> Self {
        Self {
            registry,
            tokens,
            credentials,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verifies `password` for `email` and issues an access and refresh token.
    ///
    /// An unknown email and a wrong password both fail with
    /// `InvalidCredentials`; only the debug log tells them apart.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let principal = match self.registry.find_by_identity(email).await? {
            Some(principal) => principal,
            None => {
                debug!("Login rejected: no principal registered as {}", email);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.credentials.verify(password, &principal.password_hash)? {
            debug!("Login rejected: wrong password for {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        let pair = TokenPair {
            access_token: self.tokens.issue_access_token(&principal)?,
            refresh_token: self.tokens.issue_refresh_token(&principal)?,
        };
        info!("Issued tokens for {}", principal.email);
        Ok(pair)
    }

    /// Registers a new principal and returns its public projection.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<PrincipalView, AuthError> {
        if self.registry.find_by_identity(email).await?.is_some() {
            return Err(AuthError::IdentityAlreadyExists);
        }

        let password_hash = self.credentials.hash(password)?;

        // The registry's uniqueness constraint settles a concurrent
        // registration that passed the lookup above.
        let principal = self
            .registry
            .create(Principal::new(email, password_hash, name))
            .await
            .map_err(|e| match e {
                StoreError::DuplicateIdentity => AuthError::IdentityAlreadyExists,
                other => AuthError::Store(other),
            })?;

        info!("Registered principal {}", principal.email);
        Ok(principal.view())
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The refresh token is returned unchanged; it is not rotated.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.validate_refresh(refresh_token).map_err(|e| {
            warn!("Refresh rejected: {}", e);
            e
        })?;

        let principal = self
            .registry
            .find_by_identity(&claims.sub)
            .await?
            .ok_or(AuthError::UnknownPrincipal)?;

        let access_token = self.tokens.issue_access_token(&principal)?;
        info!("Refreshed access token for {}", principal.email);

        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.to_string(),
        })
    }
}
