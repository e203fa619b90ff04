/// Schema-less resource documents and their collections
///
/// Projects, blogs and skills share one storage shape: a generated id plus an
/// arbitrary JSON object supplied by the caller. Each collection lives in its
/// own table with identical columns.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     seq BIGSERIAL NOT NULL,
///     id UUID PRIMARY KEY,
///     body JSONB NOT NULL DEFAULT '{}'::jsonb,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// -- blogs and skills are identical
/// ```
///
/// `seq` records insertion order, which is the order `list` returns.
/// Updates use the JSONB `||` operator, a shallow merge on top-level keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::{types::Json, PgPool};
use std::fmt;
use uuid::Uuid;

/// Field name the generated identifier is serialized under
pub const ID_FIELD: &str = "_id";

/// Top-level fields of a document
pub type Fields = Map<String, Value>;

/// Resource collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Projects,
    Blogs,
    Skills,
}

impl Collection {
    /// All collections, in routing order
    pub const ALL: [Collection; 3] = [Collection::Projects, Collection::Blogs, Collection::Skills];

    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Blogs => "blogs",
            Collection::Skills => "skills",
        }
    }

    /// Singular path segment (`project`, `blog`, `skill`)
    pub fn singular(&self) -> &'static str {
        match self {
            Collection::Projects => "project",
            Collection::Blogs => "blog",
            Collection::Skills => "skill",
        }
    }

    /// Plural path segment, same as the table name
    pub fn plural(&self) -> &'static str {
        self.table()
    }

    /// Capitalized singular name for user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Projects => "Project",
            Collection::Blogs => "Blog",
            Collection::Skills => "Skill",
        }
    }

    /// Capitalized plural name for user-facing messages
    pub fn label_plural(&self) -> &'static str {
        match self {
            Collection::Projects => "Projects",
            Collection::Blogs => "Blogs",
            Collection::Skills => "Skills",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A stored document
///
/// Serializes as a flat JSON object with the id under `_id`:
///
/// ```json
/// { "_id": "6f1c…", "title": "Portfolio", "tags": ["rust"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(flatten)]
    pub fields: Fields,
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            fields: row.body.0,
        }
    }
}

/// Drops a caller-supplied `_id`; identifiers are generated and immutable.
pub fn strip_id(mut fields: Fields) -> Fields {
    fields.remove(ID_FIELD);
    fields
}

/// Parses a path identifier, returning `None` for anything that is not a UUID.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

impl Document {
    /// Creates a document with a fresh id
    pub fn new(fields: Fields) -> Self {
        Self {
            id: Uuid::new_v4(),
            fields: strip_id(fields),
        }
    }

    /// Shallow merge: top-level keys in `patch` overwrite, everything else stays.
    pub fn merge(&mut self, patch: Fields) {
        for (key, value) in strip_id(patch) {
            self.fields.insert(key, value);
        }
    }

    /// Inserts a document into a collection
    pub async fn insert(
        pool: &PgPool,
        collection: Collection,
        fields: Fields,
    ) -> Result<Self, sqlx::Error> {
        let doc = Document::new(fields);

        let query = format!(
            "INSERT INTO {} (id, body) VALUES ($1, $2) RETURNING id, body",
            collection.table()
        );

        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(doc.id)
            .bind(Json(doc.fields))
            .fetch_one(pool)
            .await?;

        Ok(row.into())
    }

    /// Lists every document in insertion order
    pub async fn list(pool: &PgPool, collection: Collection) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!("SELECT id, body FROM {} ORDER BY seq", collection.table());

        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    /// Finds a document by id
    pub async fn find_by_id(
        pool: &PgPool,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT id, body FROM {} WHERE id = $1", collection.table());

        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Document::from))
    }

    /// Merges `patch` into the stored body and returns the updated document
    ///
    /// Returns `None` if no document has this id.
    pub async fn merge_by_id(
        pool: &PgPool,
        collection: Collection,
        id: Uuid,
        patch: Fields,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET body = body || $2 WHERE id = $1 RETURNING id, body",
            collection.table()
        );

        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .bind(Json(strip_id(patch)))
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Document::from))
    }

    /// Deletes a document, returning the number of rows removed (0 or 1)
    pub async fn delete_by_id(
        pool: &PgPool,
        collection: Collection,
        id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", collection.table());

        let result = sqlx::query(&query).bind(id).execute(pool).await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Projects.table(), "projects");
        assert_eq!(Collection::Blogs.singular(), "blog");
        assert_eq!(Collection::Skills.plural(), "skills");
        assert_eq!(Collection::Skills.label(), "Skill");
        assert_eq!(Collection::Projects.to_string(), "projects");
    }

    #[test]
    fn test_document_serializes_flat_with_id() {
        let doc = Document::new(fields(json!({ "title": "Folio", "stars": 3 })));
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["_id"], doc.id.to_string());
        assert_eq!(value["title"], "Folio");
        assert_eq!(value["stars"], 3);
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_new_ignores_caller_id() {
        let doc = Document::new(fields(json!({ "_id": "mine", "x": 1 })));
        assert!(!doc.fields.contains_key(ID_FIELD));
        assert_eq!(doc.fields["x"], 1);
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut doc = Document::new(fields(json!({
            "x": 0,
            "y": 2,
            "meta": { "a": 1, "b": 2 }
        })));
        let id = doc.id;

        doc.merge(fields(json!({ "x": 1, "meta": { "a": 9 }, "_id": "other" })));

        assert_eq!(doc.id, id);
        assert_eq!(doc.fields["x"], 1);
        assert_eq!(doc.fields["y"], 2);
        // nested objects are replaced, not merged
        assert_eq!(doc.fields["meta"], json!({ "a": 9 }));
        assert!(!doc.fields.contains_key(ID_FIELD));
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()), Some(id));
        assert_eq!(parse_id("not-an-id"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("64b7f0c2e4b0a1a2b3c4d5e6"), None);
    }
}
