/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use folio_api::{app::{AppState, build_router}, config::Config};
/// use folio_shared::store::memory::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(MemoryStore::new(), config)?;
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::auth::write_guard, response::ApiResponse};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Router,
};
use folio_shared::{
    auth::service::{AuthService, TokenSettings},
    models::document::Collection,
    repository::ResourceRepository,
    store::{CredentialStore, DocumentStore, Store, StoreHealth},
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// One repository per collection
#[derive(Clone)]
pub struct Resources {
    pub projects: ResourceRepository,
    pub blogs: ResourceRepository,
    pub skills: ResourceRepository,
}

impl Resources {
    fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            projects: ResourceRepository::new(Collection::Projects, store.clone()),
            blogs: ResourceRepository::new(Collection::Blogs, store.clone()),
            skills: ResourceRepository::new(Collection::Skills, store),
        }
    }

    pub fn get(&self, collection: Collection) -> &ResourceRepository {
        match collection {
            Collection::Projects => &self.projects,
            Collection::Blogs => &self.blogs,
            Collection::Skills => &self.skills,
        }
    }
}

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub resources: Resources,

    /// Backend probe for `/health`
    pub store: Arc<dyn StoreHealth>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state over a single storage backend
    pub fn new<S: Store + 'static>(store: S, config: Config) -> anyhow::Result<Self> {
        let store = Arc::new(store);
        let users: Arc<dyn CredentialStore> = store.clone();
        let documents: Arc<dyn DocumentStore> = store.clone();
        let health: Arc<dyn StoreHealth> = store;

        let tokens = TokenSettings {
            secret: config.jwt.secret.clone(),
            expires_in: chrono::Duration::from_std(config.jwt.expires_in)?,
        };

        Ok(Self {
            auth: AuthService::new(users, tokens),
            resources: Resources::new(documents),
            store: health,
            config: Arc::new(config),
        })
    }
}

/// Routes for one collection
///
/// ```text
/// POST   /create-{singular}
/// GET    /{plural}
/// GET    /{singular}/:id
/// PUT    /{singular}/:id
/// DELETE /{singular}/:id
/// ```
fn collection_routes(state: &AppState, collection: Collection) -> Router<AppState> {
    use crate::routes::resources;

    Router::new()
        .route(
            &format!("/create-{}", collection.singular()),
            post(resources::create),
        )
        .route(&format!("/{}", collection.plural()), get(resources::list))
        .route(
            &format!("/{}/:id", collection.singular()),
            get(resources::get)
                .put(resources::update)
                .delete(resources::delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            write_guard,
        ))
        .layer(Extension(collection))
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /                      # Liveness
/// ├── GET /health                # Store probe
/// └── /api/
///     ├── POST /register
///     ├── POST /login
///     └── projects, blogs, skills (see `collection_routes`)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Write guard (resource routes only, off unless configured)
///
/// Unknown paths get a JSON 404 and wrong methods a JSON 405, both in the
/// response envelope.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new()
        .route("/", get(routes::health::liveness))
        .route("/health", get(routes::health::health_check));

    let mut api_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    for collection in Collection::ALL {
        api_routes = api_routes.merge(collection_routes(&state, collection));
    }

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(axum::middleware::map_response(method_not_allowed))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

async fn route_not_found() -> ApiResponse<()> {
    ApiResponse::message(StatusCode::NOT_FOUND, "Route not found")
}

/// Replaces axum's empty 405 body with the envelope, keeping `Allow`
async fn method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut json =
        ApiResponse::message(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    if let Some(allow) = allow {
        json.headers_mut().insert(header::ALLOW, allow);
    }
    json
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_shared::store::memory::MemoryStore;

    #[test]
    fn test_resources_are_keyed_by_collection() {
        let state = AppState::new(
            MemoryStore::new(),
            Config::for_memory("test-secret-key-at-least-32-bytes-long"),
        )
        .unwrap();

        for collection in Collection::ALL {
            assert_eq!(state.resources.get(collection).collection(), collection);
        }
        assert_eq!(state.store.backend_name(), "memory");
    }
}
