use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{info, warn};
use sqlx::PgPool;

use taskgate::auth::CredentialVerifier;
use taskgate::config::Config;
use taskgate::routes::{self, health};
use taskgate::store::{
    MemoryPrincipalRegistry, MemoryTaskStore, PgPrincipalRegistry, PgTaskStore,
    PrincipalRegistry, TaskStore,
};
use taskgate::AppState;

fn io_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn build_stores(
    config: &Config,
) -> io::Result<(Arc<dyn PrincipalRegistry>, Arc<dyn TaskStore>)> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPool::connect(url)
                .await
                .map_err(|e| io_error("Failed to connect to database", e))?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| io_error("Failed to run migrations", e))?;
            info!("Using Postgres storage");
            let registry: Arc<dyn PrincipalRegistry> =
                Arc::new(PgPrincipalRegistry::new(pool.clone()));
            let store: Arc<dyn TaskStore> = Arc::new(PgTaskStore::new(pool));
            Ok((registry, store))
        }
        None => {
            warn!("DATABASE_URL is not set; users and tasks are kept in memory only");
            let registry: Arc<dyn PrincipalRegistry> = Arc::new(MemoryPrincipalRegistry::new());
            let store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());
            Ok((registry, store))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io_error("Invalid configuration", e))?;
    let (registry, store) = build_stores(&config).await?;
    let state = AppState::new(
        registry,
        store,
        config.jwt_secret.as_bytes(),
        CredentialVerifier::new(config.bcrypt_cost),
    );

    info!("Starting taskgate server at {}", config.server_url());
    let cors_origins = config.cors_allowed_origins.clone();
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .configure(|cfg| state.register(cfg))
            .wrap(routes::cors_policy(&cors_origins))
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
