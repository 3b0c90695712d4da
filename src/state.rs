use std::sync::Arc;

use actix_web::web;

use crate::auth::{AuthService, CredentialVerifier, TokenService};
use crate::store::{PrincipalRegistry, TaskStore};
use crate::tasks::TaskService;

/// Shared services handed to every worker.
///
/// Register with `App::configure(|cfg| state.register(cfg))`; handlers and
/// `AuthMiddleware` pick the pieces up as `web::Data<_>`.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService>,
    pub tasks: web::Data<TaskService>,
    pub tokens: web::Data<TokenService>,
}

impl AppState {
    pub fn new(
        registry: Arc<dyn PrincipalRegistry>,
        store: Arc<dyn TaskStore>,
        jwt_secret: &[u8],
        credentials: CredentialVerifier,
    ) -> Self {
        let tokens = TokenService::new(jwt_secret);
        Self {
            auth: web::Data::new(AuthService::new(registry, tokens.clone(), credentials)),
            tasks: web::Data::new(TaskService::new(store)),
            tokens: web::Data::new(tokens),
        }
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.tasks.clone())
            .app_data(self.tokens.clone());
    }
}
