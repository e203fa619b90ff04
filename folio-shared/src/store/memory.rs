/// In-memory storage backend.
///
/// Users live in a `HashMap` keyed by email; documents live in one `Vec` per
/// collection so listing preserves insertion order. Every map is guarded by a
/// `tokio::sync::RwLock`: reads run concurrently, writes are serialized.
///
/// Not durable: all state is lost when the process exits.

use super::{CredentialStore, DocumentStore, StoreError, StoreHealth, StoreResult};
use crate::models::document::{Collection, Document, Fields};
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<String, User>>>,
    documents: Arc<RwLock<HashMap<Collection, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users registered under `email` (0 or 1).
    pub async fn user_count(&self, email: &str) -> usize {
        usize::from(self.users.read().await.contains_key(email))
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        match users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "email {} already registered",
                user.email
            ))),
            Entry::Vacant(slot) => {
                let user = user.into_user();
                debug!(user_id = %user.id, "Inserted user");
                Ok(slot.insert(user).clone())
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: Collection, fields: Fields) -> StoreResult<Document> {
        let doc = Document::new(fields);
        self.documents
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn list(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        Ok(self
            .documents
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>> {
        Ok(self
            .documents
            .read()
            .await
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id).cloned()))
    }

    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Fields,
    ) -> StoreResult<Option<Document>> {
        let mut documents = self.documents.write().await;
        let Some(doc) = documents
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
        else {
            return Ok(None);
        };
        doc.merge(patch);
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        let mut documents = self.documents.write().await;
        let Some(docs) = documents.get_mut(&collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok((before - docs.len()) as u64)
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
