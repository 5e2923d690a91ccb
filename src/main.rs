use std::sync::Arc;

use anyhow::Result;
use rehab_tracker::api::{routes::create_routes, state::AppState};
use rehab_tracker::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder, StorageBackend};
use rehab_tracker::store::{InMemoryStore, PostgresStore, RecordStore};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Waits for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

async fn create_store(config: &AppConfig) -> Result<Arc<dyn RecordStore>> {
    match config.storage {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = db_config.create_pool().await?;
            run_migrations(&pool).await?;
            info!("Connected to PostgreSQL and applied migrations");
            Ok(Arc::new(PostgresStore::new(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory store, data is lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // RUST_LOG wins over LOG_LEVEL
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.demo_user_id.is_none() {
        warn!("DEMO_USER_ID is not set, user-scoped endpoints will answer 500");
    }

    let store = create_store(&config).await?;

    if config.seed_on_startup {
        DatabaseSeeder::new(store.clone())
            .seed_all(config.demo_user_id.as_deref())
            .await?;
    }

    let app = create_routes(AppState::new(store, &config));

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Rehab tracker starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}
