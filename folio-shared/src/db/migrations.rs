/// Embedded schema migrations
///
/// SQL files under `folio-shared/migrations/` are compiled into the binary by
/// `sqlx::migrate!` and applied in timestamp order. Applied versions are
/// tracked in `_sqlx_migrations`, so running them again is a no-op.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Applies all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
