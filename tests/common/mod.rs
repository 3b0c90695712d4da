#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{http::header, test, web, App};
use serde_json::json;
use taskgate::auth::{password::MIN_COST, CredentialVerifier, TokenPair};
use taskgate::routes::{self, health};
use taskgate::store::{MemoryPrincipalRegistry, MemoryTaskStore};
use taskgate::AppState;

pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// Fresh in-memory state with a cheap bcrypt cost.
pub fn test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryPrincipalRegistry::new()),
        Arc::new(MemoryTaskStore::new()),
        TEST_SECRET,
        CredentialVerifier::new(MIN_COST),
    )
}

/// The same app layout `main.rs` serves, minus CORS.
pub async fn init_app(
    state: &AppState,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .configure(|cfg| state.register(cfg))
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Registers `email` and logs in, returning the issued token pair.
pub async fn register_and_login_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    name: &str,
    password: &str,
) -> Result<TokenPair, String> {
    let req_register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": email,
            "password": password,
            "name": name
        }))
        .to_request();
    let resp_register = test::call_service(app, req_register).await;
    let status = resp_register.status();
    if !status.is_success() {
        let body = test::read_body(resp_register).await;
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }

    let req_login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp_login = test::call_service(app, req_login).await;
    let status = resp_login.status();
    let body = test::read_body(resp_login).await;
    if !status.is_success() {
        return Err(format!(
            "Failed to log in. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }

    serde_json::from_slice(&body).map_err(|e| format!("Failed to parse login response: {}", e))
}
