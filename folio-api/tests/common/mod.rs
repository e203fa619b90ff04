/// Common test utilities for integration tests
///
/// Every test gets a fresh router over a [`MemoryStore`], so no database is
/// needed. [`UnavailableStore`] stands in for a backend that cannot be reached.
/// Requests are driven through `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use folio_api::app::{build_router, AppState};
use folio_api::config::Config;
use folio_shared::models::document::{Collection, Document, Fields};
use folio_shared::models::user::{NewUser, User};
use folio_shared::store::memory::MemoryStore;
use folio_shared::store::{
    CredentialStore, DocumentStore, Store, StoreError, StoreHealth, StoreResult,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing the router and its backing store
pub struct TestContext {
    pub app: Router,
    pub store: MemoryStore,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::for_memory(TEST_SECRET))
    }

    /// Context with bearer tokens required on resource writes
    pub fn guarded() -> Self {
        let mut config = Config::for_memory(TEST_SECRET);
        config.api.require_auth_for_writes = true;
        Self::with_config(config)
    }

    /// Context whose every storage call fails as unreachable
    pub fn unavailable() -> Self {
        Self {
            app: router(UnavailableStore, Config::for_memory(TEST_SECRET)),
            store: MemoryStore::new(),
        }
    }

    fn with_config(config: Config) -> Self {
        let store = MemoryStore::new();
        Self {
            app: router(store.clone(), config),
            store,
        }
    }

    /// Sends a request and returns the status and parsed JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None, None).await
    }

    /// Registers a user and returns a login token
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        let (status, _) = self
            .post(
                "/api/register",
                serde_json::json!({ "name": "Test User", "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .post(
                "/api/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("token").to_string()
    }
}

fn router<S: Store + 'static>(store: S, config: Config) -> Router {
    build_router(AppState::new(store, config).expect("valid test config"))
}

/// Backend that behaves like a pool that cannot hand out connections
pub struct UnavailableStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("pool timed out".to_string()))
}

#[async_trait]
impl CredentialStore for UnavailableStore {
    async fn find_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        unavailable()
    }

    async fn insert(&self, _user: NewUser) -> StoreResult<User> {
        unavailable()
    }
}

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn create(&self, _collection: Collection, _fields: Fields) -> StoreResult<Document> {
        unavailable()
    }

    async fn list(&self, _collection: Collection) -> StoreResult<Vec<Document>> {
        unavailable()
    }

    async fn get(&self, _collection: Collection, _id: Uuid) -> StoreResult<Option<Document>> {
        unavailable()
    }

    async fn update(
        &self,
        _collection: Collection,
        _id: Uuid,
        _patch: Fields,
    ) -> StoreResult<Option<Document>> {
        unavailable()
    }

    async fn delete(&self, _collection: Collection, _id: Uuid) -> StoreResult<u64> {
        unavailable()
    }
}

#[async_trait]
impl StoreHealth for UnavailableStore {
    async fn health_check(&self) -> StoreResult<()> {
        unavailable()
    }

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}
