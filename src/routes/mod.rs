pub mod auth;
pub mod health;
pub mod tasks;

use actix_cors::Cors;
use actix_web::{error::InternalError, web, HttpResponse};
use serde_json::json;

use crate::auth::AuthMiddleware;

/// Mounts the `/auth` and `/tasks` scopes. Intended to be nested under `/api`.
///
/// Only the task scope is behind `AuthMiddleware`; login, registration and
/// refresh are reachable without a bearer token.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/auth")
                .service(auth::login)
                .service(auth::register)
                .service(auth::refresh),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::complete_task)
                .service(tasks::delete_task),
        );
}

/// CORS for the configured origins. A `*` entry allows any origin.
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.iter().any(|origin| origin == "*") {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };
    cors.allow_any_method().allow_any_header().max_age(3600)
}

/// Bodies that fail to deserialize get the same JSON error shape as
/// everything else.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        InternalError::from_response(err, response).into()
    })
}
