use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The email of the caller, taken from the access token claims.
///
/// Only available on routes wrapped by `AuthMiddleware`, which validates the
/// token and inserts its `Claims` into request extensions. Without them the
/// extractor fails with `AppError::Unauthorized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal(pub String);

impl AuthenticatedPrincipal {
    pub fn email(&self) -> &str {
        &self.0
    }
}

impl FromRequest for AuthenticatedPrincipal {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedPrincipal(claims.sub.clone()))),
            None => {
                let err = AppError::Unauthorized(
                    "Authenticated principal not found in request".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
