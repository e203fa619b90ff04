/// Registration and login
///
/// [`AuthService`] ties the credential store to password hashing and token
/// issuance. It holds no mutable state; clone it freely.
///
/// # Flow
///
/// - `register`: reject a known email, hash the password, insert. The insert
///   itself rejects duplicates too, so two racing registrations for the same
///   email cannot both succeed.
/// - `login`: look up by email, verify the hash, sign a token carrying the
///   email. Unknown email and wrong password produce the same error.

use super::jwt::{self, Claims, JwtError};
use super::password::{self, PasswordError};
use crate::models::user::{NewUser, User};
use crate::store::{CredentialStore, StoreError};
use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Store(StoreError),

    #[error("password hashing task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

impl From<StoreError> for AuthServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => AuthServiceError::DuplicateUser,
            other => AuthServiceError::Store(other),
        }
    }
}

/// Token signing settings
#[derive(Debug, Clone)]
pub struct TokenSettings {
    /// HS256 secret
    pub secret: String,

    /// Lifetime of issued tokens
    pub expires_in: Duration,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    tokens: TokenSettings,
}

impl AuthService {
    pub fn new(users: Arc<dyn CredentialStore>, tokens: TokenSettings) -> Self {
        Self { users, tokens }
    }

    /// Registers a new user; no token is issued
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthServiceError> {
        if self.users.find_by_email(email).await?.is_some() {
            debug!(email, "Registration rejected: email exists");
            return Err(AuthServiceError::DuplicateUser);
        }

        let plaintext = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || password::hash_password(&plaintext)).await??;

        let user = self
            .users
            .insert(NewUser {
                name: name.to_owned(),
                email: email.to_owned(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Verifies credentials and returns a signed session token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let plaintext = password.to_owned();
        let stored = user.password_hash.clone();
        let valid =
            tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored))
                .await??;

        if !valid {
            debug!(email, "Login rejected: wrong password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        let claims = Claims::new(user.email, self.tokens.expires_in);
        let token = jwt::create_token(&claims, &self.tokens.secret)?;

        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Validates a token issued by [`login`](Self::login)
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        jwt::validate_token(token, &self.tokens.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn service() -> (AuthService, MemoryStore) {
        let store = MemoryStore::new();
        let service = AuthService::new(
            Arc::new(store.clone()),
            TokenSettings {
                secret: SECRET.to_string(),
                expires_in: Duration::hours(1),
            },
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (auth, store) = service();

        let user = auth.register("Ada", "ada@example.com", "hunter2").await.unwrap();

        assert_eq!(user.name, "Ada");
        assert_ne!(user.password_hash, "hunter2");
        assert!(password::verify_password("hunter2", &user.password_hash).unwrap());
        assert_eq!(store.user_count("ada@example.com").await, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (auth, store) = service();

        auth.register("Ada", "ada@example.com", "hunter2").await.unwrap();
        let err = auth
            .register("Other", "ada@example.com", "different")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthServiceError::DuplicateUser));
        assert_eq!(store.user_count("ada@example.com").await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_registration_single_winner() {
        let (auth, store) = service();

        let (a, b) = tokio::join!(
            auth.register("A", "race@example.com", "pw-one"),
            auth.register("B", "race@example.com", "pw-two"),
        );

        assert_eq!(
            [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(),
            1,
            "exactly one registration should win"
        );
        assert_eq!(store.user_count("race@example.com").await, 1);
    }

    #[tokio::test]
    async fn test_login_issues_token_with_email_claim() {
        let (auth, _) = service();
        auth.register("Ada", "ada@example.com", "hunter2").await.unwrap();

        let token = auth.login("ada@example.com", "hunter2").await.unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (auth, _) = service();
        auth.register("Ada", "ada@example.com", "hunter2").await.unwrap();

        let wrong_password = auth.login("ada@example.com", "nope").await.unwrap_err();
        let unknown_email = auth.login("bob@example.com", "hunter2").await.unwrap_err();

        assert!(matches!(wrong_password, AuthServiceError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthServiceError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}
