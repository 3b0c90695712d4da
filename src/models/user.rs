use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user as held by the principal registry.
///
/// `email` is the identity and primary key; it never changes after creation.
/// `password_hash` is the bcrypt output and never leaves the server; use
/// [`Principal::view`] for responses.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Principal {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

impl Principal {
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            name: name.into(),
        }
    }

    /// The externally visible projection of this principal.
    pub fn view(&self) -> PrincipalView {
        PrincipalView {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Public projection of a [`Principal`]: identity and display name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalView {
    pub email: String,
    pub name: String,
}
