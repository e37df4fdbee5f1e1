/// Persisted login sessions
///
/// A session binds a browser to an authenticated user. The token handed to
/// the cookie is 32 random bytes, hex-encoded; only its SHA-256 digest is
/// stored, so a leaked `sessions` table cannot be replayed.
///
/// # Lifecycle
///
/// ```text
/// login  → Session::create   (row inserted, plaintext token → cookie)
/// request → Session::resolve (digest lookup, expiry check, join to user)
/// logout → Session::revoke   (row deleted)
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     token_hash VARCHAR(64) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL
/// );
/// ```
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::User;

/// Name of the browser cookie carrying the session token
pub const SESSION_COOKIE: &str = "tasknest_session";

/// A row in the `sessions` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Unique session ID
    pub id: Uuid,

    /// User this session authenticates
    pub user_id: Uuid,

    /// SHA-256 digest of the cookie token (never the token itself)
    pub token_hash: String,

    /// When the session was established
    pub created_at: DateTime<Utc>,

    /// When the session stops resolving
    pub expires_at: DateTime<Utc>,
}

/// Resolved authentication state attached to a request
///
/// Built by the web layer's session middleware after a successful
/// `Session::resolve`, and read back by protected handlers via `Extension`.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session row that authenticated this request
    pub session_id: Uuid,

    /// The authenticated user
    pub user: User,
}

impl Session {
    /// Generates a fresh session token: 32 random bytes, hex-encoded
    pub fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Hashes a session token with SHA-256
    ///
    /// # Example
    ///
    /// ```
    /// use tasknest_shared::auth::session::Session;
    ///
    /// let digest = Session::hash_token("deadbeef");
    /// assert_eq!(digest.len(), 64); // SHA-256 hex is 64 chars
    /// ```
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Establishes a session for a user
    ///
    /// Returns the stored row together with the plaintext token. The token is
    /// only returned once; hand it straight to the cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<(Self, String), sqlx::Error> {
        let token = Self::generate_token();
        let token_hash = Self::hash_token(&token);
        let expires_at = Utc::now() + ttl;

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, created_at, expires_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        Ok((session, token))
    }

    /// Resolves a presented token to an authenticated user
    ///
    /// Returns `None` for unknown tokens, expired sessions, and sessions whose
    /// user row no longer exists. Account deletion is not currently possible,
    /// but a dangling session must not authenticate anyone.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn resolve(pool: &PgPool, token: &str) -> Result<Option<AuthSession>, sqlx::Error> {
        let token_hash = Self::hash_token(token);

        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token_hash, created_at, expires_at
            FROM sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        let Some(session) = session else {
            return Ok(None);
        };

        let user = User::find_by_id(pool, session.user_id).await?;

        Ok(user.map(|user| AuthSession {
            session_id: session.id,
            user,
        }))
    }

    /// Invalidates a session (logout)
    ///
    /// Returns true if a row was removed, false if the session was already
    /// gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn revoke(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_length() {
        let token = Session::generate_token();
        assert_eq!(token.len(), 64); // 32 bytes hex-encoded
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_token_unique() {
        let a = Session::generate_token();
        let b = Session::generate_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_token_deterministic() {
        let token = Session::generate_token();
        assert_eq!(Session::hash_token(&token), Session::hash_token(&token));
    }

    #[test]
    fn test_hash_token_differs_from_token() {
        let token = Session::generate_token();
        assert_ne!(Session::hash_token(&token), token);
    }

    #[test]
    fn test_is_expired() {
        let session = Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: Session::hash_token("x"),
            created_at: Utc::now() - Duration::hours(2),
            expires_at: Utc::now() - Duration::hours(1),
        };
        assert!(session.is_expired());

        let live = Session {
            expires_at: Utc::now() + Duration::hours(1),
            ..session
        };
        assert!(!live.is_expired());
    }
}
