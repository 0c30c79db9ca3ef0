use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tokio::sync::watch;
use tracing::{info, warn};

use kn_api::{create_app, telemetry, AppState, Repositories};
use kn_core::clock::SystemClock;
use kn_core::repositories::MemoryStore;
use kn_core::services::{AuthServiceConfig, RevocationReaper, TokenServiceConfig};
use kn_infra::DatabasePool;
use kn_shared::{AppConfig, Environment, LoggingConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init_tracing(&LoggingConfig::for_environment(Environment::from_env()));

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    info!("Starting Konnect API server ({:?})", config.environment);

    let (repositories, pool) = match config.storage {
        StorageBackend::Postgres => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("Failed to connect to the database")?;
            pool.run_migrations().await.context("Failed to run migrations")?;
            info!("{}", pool.get_statistics());
            (Repositories::postgres(&pool), Some(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage, data is lost on restart");
            (Repositories::in_memory(MemoryStore::new()), None)
        }
    };

    let state = web::Data::new(AppState::new(
        repositories,
        TokenServiceConfig::from(&config.auth.jwt),
        AuthServiceConfig::default(),
        Arc::new(SystemClock),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reaper = Arc::new(RevocationReaper::new(
        state.revocation_store.clone(),
        &config.auth.revocation,
    ));
    let reaper_handle = reaper.start_background_task(shutdown_rx);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_state = state.clone();
    let mut server = HttpServer::new(move || create_app(server_state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await.context("HTTP server error")?;

    info!("Server stopped, shutting down background tasks");
    let _ = shutdown_tx.send(true);
    if let Err(e) = reaper_handle.await {
        warn!("Revocation reaper did not stop cleanly: {}", e);
    }
    if let Some(pool) = pool {
        pool.close().await;
    }

    Ok(())
}
