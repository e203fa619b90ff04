//! # Folio Shared Library
//!
//! Domain logic for the Folio portfolio backend, independent of HTTP.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, session tokens, registration/login service
//! - `db`: Postgres pool and migrations
//! - `models`: users and schema-less documents, with their queries
//! - `store`: storage traits plus Postgres and in-memory backends
//! - `repository`: per-collection CRUD used by the HTTP layer

pub mod auth;
pub mod db;
pub mod models;
pub mod repository;
pub mod store;

/// Current version of the Folio shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
