/// Per-collection document CRUD
///
/// One [`ResourceRepository`] exists per [`Collection`]; all three share this
/// code. Identifiers arrive as raw path segments and are parsed here, so a
/// malformed id is handled exactly like a missing one: `get`/`update` return
/// `None` and `delete` reports 0 removed.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use folio_shared::models::document::Collection;
/// use folio_shared::repository::ResourceRepository;
/// use folio_shared::store::memory::MemoryStore;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let projects = ResourceRepository::new(Collection::Projects, Arc::new(MemoryStore::new()));
///
/// let fields = json!({ "title": "Folio" }).as_object().cloned().unwrap();
/// let doc = projects.create(fields).await?;
/// assert!(projects.get_by_id(&doc.id.to_string()).await?.is_some());
/// # Ok(())
/// # }
/// ```

use crate::models::document::{parse_id, Collection, Document, Fields};
use crate::store::{DocumentStore, StoreResult};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ResourceRepository {
    collection: Collection,
    store: Arc<dyn DocumentStore>,
}

impl ResourceRepository {
    pub fn new(collection: Collection, store: Arc<dyn DocumentStore>) -> Self {
        Self { collection, store }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Stores `fields` verbatim under a generated id
    pub async fn create(&self, fields: Fields) -> StoreResult<Document> {
        let doc = self.store.create(self.collection, fields).await?;
        debug!(collection = %self.collection, id = %doc.id, "Created document");
        Ok(doc)
    }

    /// Every document, in storage order
    pub async fn list_all(&self) -> StoreResult<Vec<Document>> {
        self.store.list(self.collection).await
    }

    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Document>> {
        let Some(id) = parse_id(id) else {
            debug!(collection = %self.collection, id, "Malformed id");
            return Ok(None);
        };
        self.store.get(self.collection, id).await
    }

    /// Shallow-merges `patch` into the document and returns the result
    pub async fn update_by_id(&self, id: &str, patch: Fields) -> StoreResult<Option<Document>> {
        let Some(id) = parse_id(id) else {
            debug!(collection = %self.collection, id, "Malformed id");
            return Ok(None);
        };
        let updated = self.store.update(self.collection, id, patch).await?;
        if updated.is_some() {
            debug!(collection = %self.collection, %id, "Updated document");
        }
        Ok(updated)
    }

    /// Removes the document, returning how many were deleted (0 or 1)
    pub async fn delete_by_id(&self, id: &str) -> StoreResult<u64> {
        let Some(id) = parse_id(id) else {
            debug!(collection = %self.collection, id, "Malformed id");
            return Ok(0);
        };
        let deleted = self.store.delete(self.collection, id).await?;
        debug!(collection = %self.collection, %id, deleted, "Deleted document");
        Ok(deleted)
    }
}
