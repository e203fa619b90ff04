/// Database layer
///
/// - `pool`: Postgres connection pool with a startup health check
/// - `migrations`: embedded sqlx migrations
///
/// Queries live on the models in [`crate::models`].

pub mod migrations;
pub mod pool;
