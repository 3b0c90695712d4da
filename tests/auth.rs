mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use taskgate::auth::{TokenKind, TokenPair};
use taskgate::models::{Principal, PrincipalView};

use common::{bearer, init_app, register_and_login_user, test_state};

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let state = test_state();
    let app = init_app(&state).await;

    // Register alice
    let register_payload = json!({
        "email": "alice@x.com",
        "password": "pw1",
        "name": "Alice"
    });
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "email": "alice@x.com", "name": "Alice" }));

    // Registering the same email again conflicts
    let req_conflict = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp_conflict = test::call_service(&app, req_conflict).await;
    assert_eq!(resp_conflict.status(), StatusCode::CONFLICT);

    // Login returns both tokens for alice
    let req_login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "alice@x.com", "password": "pw1" }))
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    assert_eq!(resp_login.status(), StatusCode::OK);
    let pair: TokenPair = test::read_body_json(resp_login).await;

    let access = state.tokens.validate_access(&pair.access_token).unwrap();
    let refresh = state.tokens.validate_refresh(&pair.refresh_token).unwrap();
    assert_eq!(access.sub, "alice@x.com");
    assert_eq!(refresh.sub, "alice@x.com");

    // Wrong password
    let req_wrong = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "alice@x.com", "password": "wrong" }))
        .to_request();
    let resp_wrong = test::call_service(&app, req_wrong).await;
    assert_eq!(resp_wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_body: serde_json::Value = test::read_body_json(resp_wrong).await;

    // Unknown email gets the identical response
    let req_unknown = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@x.com", "password": "pw1" }))
        .to_request();
    let resp_unknown = test::call_service(&app, req_unknown).await;
    assert_eq!(resp_unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: serde_json::Value = test::read_body_json(resp_unknown).await;
    assert_eq!(wrong_body, unknown_body);
}

#[actix_rt::test]
async fn test_refresh_flow() {
    let state = test_state();
    let app = init_app(&state).await;
    let pair = register_and_login_user(&app, "alice@x.com", "Alice", "pw1")
        .await
        .expect("Failed to register/login alice");

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refresh_token": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let refreshed: TokenPair = test::read_body_json(resp).await;

    assert_eq!(refreshed.refresh_token, pair.refresh_token);
    let claims = state.tokens.validate_access(&refreshed.access_token).unwrap();
    assert_eq!(claims.sub, "alice@x.com");

    // The new access token works on protected routes
    let req_tasks = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(bearer(&refreshed.access_token))
        .to_request();
    let resp_tasks = test::call_service(&app, req_tasks).await;
    assert_eq!(resp_tasks.status(), StatusCode::OK);

    // The auth scheme name is matched case-insensitively
    let req_lower = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("bearer {}", refreshed.access_token)))
        .to_request();
    let resp_lower = test::call_service(&app, req_lower).await;
    assert_eq!(resp_lower.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_token_classes_are_not_interchangeable() {
    let state = test_state();
    let app = init_app(&state).await;
    let pair = register_and_login_user(&app, "alice@x.com", "Alice", "pw1")
        .await
        .expect("Failed to register/login alice");

    // Access token presented for refresh
    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refresh_token": pair.access_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Refresh token presented as bearer
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(bearer(&pair.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_refresh_for_unknown_principal() {
    let state = test_state();
    let app = init_app(&state).await;
    let ghost = Principal::new("ghost@x.com", "$2b$04$unused", "Ghost");
    let refresh = state.tokens.issue_refresh_token(&ghost).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_expired_and_missing_bearer_tokens() {
    let state = test_state();
    let app = init_app(&state).await;
    register_and_login_user(&app, "alice@x.com", "Alice", "pw1")
        .await
        .expect("Failed to register/login alice");

    let alice = Principal::new("alice@x.com", "$2b$04$unused", "Alice");
    let expired = state
        .tokens
        .issue_at(&alice, TokenKind::Access, Utc::now() - Duration::hours(73))
        .unwrap();

    let cases = vec![
        (Some(format!("Bearer {}", expired)), "expired access token"),
        (Some("Bearer not.a.token".to_string()), "malformed token"),
        (Some("Token abc".to_string()), "wrong scheme"),
        (None, "missing header"),
    ];

    for (header_value, description) in cases {
        let mut req = test::TestRequest::get().uri("/api/tasks");
        if let Some(value) = header_value {
            req = req.insert_header(("Authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "Test case failed: {}",
            description
        );
    }
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let state = test_state();
    let app = init_app(&state).await;

    let test_cases = vec![
        // Deserialization errors (expect 400 for missing fields)
        (
            json!({ "password": "pw1", "name": "Alice" }),
            StatusCode::BAD_REQUEST,
            "missing email",
        ),
        (
            json!({ "email": "alice@x.com", "name": "Alice" }),
            StatusCode::BAD_REQUEST,
            "missing password",
        ),
        (
            json!({ "email": "alice@x.com", "password": "pw1" }),
            StatusCode::BAD_REQUEST,
            "missing name",
        ),
        // Validation errors (expect 422 after successful deserialization)
        (
            json!({ "email": "invalid-email", "password": "pw1", "name": "Alice" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid email format",
        ),
        (
            json!({ "email": "alice@x.com", "password": "", "name": "Alice" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty password",
        ),
        (
            json!({ "email": "alice@x.com", "password": "pw1", "name": "a".repeat(51) }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "name too long",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: serde_json::Value = test::read_body_json(resp).await;

        assert_eq!(
            status, expected_status,
            "Test case failed: {}. Body: {}",
            description, body
        );
        assert!(body["error"].is_string(), "error body for {}", description);
    }
}

#[actix_rt::test]
async fn test_password_byte_limit_blocks_truncated_logins() {
    let state = test_state();
    let app = init_app(&state).await;
    let prefix = "é".repeat(36);

    // 37 characters but 73 bytes: refused instead of stored truncated
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "multi@x.com",
            "password": format!("{}a", prefix),
            "name": "Multi"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "multi@x.com", "password": format!("{}b", prefix) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Exactly 72 bytes registers; a longer password sharing those bytes does not log in
    register_and_login_user(&app, "multi@x.com", "Multi", &prefix)
        .await
        .expect("A 72-byte password should register and log in");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "multi@x.com", "password": format!("{}b", prefix) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(
        resp.status().is_client_error(),
        "Expected rejection, got {}",
        resp.status()
    );
}

#[actix_rt::test]
async fn test_invalid_login_inputs() {
    let state = test_state();
    let app = init_app(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "login@x.com", "password": "Password123!", "name": "Login" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let registered: PrincipalView = test::read_body_json(resp).await;
    assert_eq!(registered.email, "login@x.com");

    let test_cases = vec![
        (
            json!({ "password": "Password123!" }),
            StatusCode::BAD_REQUEST,
            "missing email",
        ),
        (
            json!({ "email": "login@x.com" }),
            StatusCode::BAD_REQUEST,
            "missing password",
        ),
        (
            json!({ "email": "invalid-email", "password": "Password123!" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid email format",
        ),
        (
            json!({ "email": "login@x.com", "password": "WrongPassword123!" }),
            StatusCode::UNAUTHORIZED,
            "incorrect password",
        ),
        (
            json!({ "email": "nonexistent@x.com", "password": "Password123!" }),
            StatusCode::UNAUTHORIZED,
            "non-existent user",
        ),
        (
            json!({ "email": "login@x.com", "password": "Password123!" }),
            StatusCode::OK,
            "valid credentials",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body_bytes = test::read_body(resp).await;

        assert_eq!(
            status,
            expected_status,
            "Test case failed: {}. Body: {:?}",
            description,
            String::from_utf8_lossy(&body_bytes)
        );
    }
}
