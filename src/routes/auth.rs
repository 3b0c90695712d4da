use crate::{
    auth::{AuthService, LoginRequest, RefreshRequest, RegisterRequest},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new account and returns its public profile (email and name).
///
/// ## Responses:
/// - `201 Created`: `{ "email": ..., "name": ... }`.
/// - `409 Conflict`: The email is already registered.
/// - `422 Unprocessable Entity`: Input validation failed.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let principal = auth
        .register(
            &register_data.email,
            &register_data.password,
            &register_data.name,
        )
        .await?;

    Ok(HttpResponse::Created().json(principal))
}

/// Login user
///
/// Verifies the credentials and returns an access and a refresh token.
///
/// ## Responses:
/// - `200 OK`: `{ "access_token": ..., "refresh_token": ... }`.
/// - `401 Unauthorized`: Unknown email or wrong password (indistinguishable).
/// - `422 Unprocessable Entity`: Input validation failed.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let tokens = auth.login(&login_data.email, &login_data.password).await?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// Refresh access token
///
/// Exchanges a refresh token for a new access token. The refresh token is
/// echoed back unchanged.
///
/// ## Responses:
/// - `200 OK`: `{ "access_token": ..., "refresh_token": ... }`.
/// - `401 Unauthorized`: The refresh token is invalid, expired, malformed, an
///   access token, or names a user that no longer exists.
#[post("/refresh")]
pub async fn refresh(
    auth: web::Data<AuthService>,
    refresh_data: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    refresh_data.validate()?;

    let tokens = auth.refresh(&refresh_data.refresh_token).await?;

    Ok(HttpResponse::Ok().json(tokens))
}
