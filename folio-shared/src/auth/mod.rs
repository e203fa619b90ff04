/// Authentication
///
/// - [`password`]: Argon2id hashing and verification
/// - [`jwt`]: HS256 session tokens carrying an email claim
/// - [`service`]: registration and login on top of a credential store
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use chrono::Duration;
/// use folio_shared::auth::service::{AuthService, TokenSettings};
/// use folio_shared::store::memory::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = AuthService::new(
///     Arc::new(MemoryStore::new()),
///     TokenSettings {
///         secret: "your-secret-key-at-least-32-bytes".to_string(),
///         expires_in: Duration::hours(1),
///     },
/// );
///
/// auth.register("Ada", "ada@example.com", "hunter2").await?;
/// let token = auth.login("ada@example.com", "hunter2").await?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod password;
pub mod service;
