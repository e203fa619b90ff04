/// Postgres storage backend.
///
/// Thin adapter from the store traits onto the model-level queries in
/// [`crate::models`]. Consistency relies on Postgres per-row atomicity; no
/// operation spans more than one statement.

use super::{CredentialStore, DocumentStore, StoreError, StoreHealth, StoreResult};
use crate::db::pool;
use crate::models::document::{Collection, Document, Fields};
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let email = user.email.clone();
        match User::insert(&self.pool, user).await? {
            Some(user) => {
                debug!(user_id = %user.id, "Inserted user");
                Ok(user)
            }
            None => Err(StoreError::Conflict(format!(
                "email {email} already registered"
            ))),
        }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn create(&self, collection: Collection, fields: Fields) -> StoreResult<Document> {
        Ok(Document::insert(&self.pool, collection, fields).await?)
    }

    async fn list(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        Ok(Document::list(&self.pool, collection).await?)
    }

    async fn get(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>> {
        Ok(Document::find_by_id(&self.pool, collection, id).await?)
    }

    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Fields,
    ) -> StoreResult<Option<Document>> {
        Ok(Document::merge_by_id(&self.pool, collection, id, patch).await?)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        Ok(Document::delete_by_id(&self.pool, collection, id).await?)
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(pool::health_check(&self.pool).await?)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
