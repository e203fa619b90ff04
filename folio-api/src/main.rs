//! # Folio API Server
//!
//! REST backend for a personal portfolio: user registration and login plus
//! CRUD over projects, blogs and skills.
//!
//! ## Usage
//!
//! ```bash
//! STORE_BACKEND=memory JWT_SECRET=$(openssl rand -hex 32) cargo run -p folio-api
//! ```

use folio_api::{
    app::{build_router, AppState},
    config::{Config, StoreBackend},
};
use folio_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::{memory::MemoryStore, postgres::PgStore, Store},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "folio_api=debug,folio_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Folio API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on exit");
            serve(MemoryStore::new(), config).await
        }
        StoreBackend::Postgres => {
            let url = config
                .store
                .database_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

            let pool = create_pool(DatabaseConfig {
                max_connections: config.store.max_connections,
                ..DatabaseConfig::new(url)
            })
            .await?;

            if config.store.run_migrations {
                run_migrations(&pool).await?;
            }

            let result = serve(PgStore::new(pool.clone()), config).await;
            close_pool(pool).await;
            result
        }
    }
}

async fn serve<S: Store + 'static>(store: S, config: Config) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(store, config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
