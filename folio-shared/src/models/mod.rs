/// Data models and their Postgres operations
///
/// # Models
///
/// - `user`: registered accounts (credential store records)
/// - `document`: schema-less project/blog/skill documents
///
/// Storage backends in [`crate::store`] build on these.

pub mod document;
pub mod user;
