/// Storage backends.
///
/// Two traits describe what the services need from storage:
/// - [`CredentialStore`]: user lookup and reject-on-conflict insert.
/// - [`DocumentStore`]: per-collection document CRUD.
///
/// [`postgres::PgStore`] is the durable backend. [`memory::MemoryStore`] keeps
/// everything in process and is used for development and tests.

use crate::models::document::{Collection, Document, Fields};
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use sqlx::Error as DbError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend could not be reached (pool timeout, I/O, closed pool).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(DbError),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Inserts the user, failing with [`StoreError::Conflict`] if the email exists.
    async fn insert(&self, user: NewUser) -> StoreResult<User>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(&self, collection: Collection, fields: Fields) -> StoreResult<Document>;
    async fn list(&self, collection: Collection) -> StoreResult<Vec<Document>>;
    async fn get(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>>;
    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Fields,
    ) -> StoreResult<Option<Document>>;
    async fn delete(&self, collection: Collection, id: Uuid) -> StoreResult<u64>;
}

/// Operational surface shared by every backend.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}

/// A full backend: credentials, documents and health.
pub trait Store: CredentialStore + DocumentStore + StoreHealth {}

impl<T> Store for T where T: CredentialStore + DocumentStore + StoreHealth {}
