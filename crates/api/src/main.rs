use anyhow::{Context, Result};
use domain::services::{
    CredentialStore, FeedbackStore, InMemoryCredentialStore, InMemoryFeedbackStore,
};
use feedback_desk_api::{
    app::create_app,
    config::{Config, StorageBackend},
    middleware::{init_metrics, logging::init_logging},
    services::bootstrap_admin,
};
use persistence::repositories::{AdminUserRepository, FeedbackRepository};
use std::sync::Arc;
use tracing::{info, warn};

type Stores = (Arc<dyn FeedbackStore>, Arc<dyn CredentialStore>);

async fn open_stores(config: &Config) -> Result<Stores> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let db_config: persistence::db::DatabaseConfig = (&config.database).into();
            let pool = persistence::db::create_pool(&db_config)
                .await
                .context("failed to connect to database")?;

            info!("Running database migrations...");
            persistence::db::run_migrations(&pool)
                .await
                .context("failed to run migrations")?;
            info!("Migrations completed");

            Ok((
                Arc::new(FeedbackRepository::new(pool.clone())),
                Arc::new(AdminUserRepository::new(pool)),
            ))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; all data is lost on restart");
            Ok((
                Arc::new(InMemoryFeedbackStore::new()),
                Arc::new(InMemoryCredentialStore::new()),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load().context("failed to load configuration")?;

    init_logging(&config.logging);
    init_metrics().context("failed to install metrics recorder")?;

    info!("Starting Feedback Desk API v{}", env!("CARGO_PKG_VERSION"));

    let (feedback, credentials) = open_stores(&config).await?;

    bootstrap_admin(credentials.as_ref(), &config.admin)
        .await
        .context("failed to bootstrap admin account")?;

    let addr = config.socket_addr().context("invalid server address")?;
    let app = create_app(config, feedback, credentials);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
