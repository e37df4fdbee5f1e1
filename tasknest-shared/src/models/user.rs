/// User model and database operations
///
/// A user owns zero or more active todos and zero or more archived tasks.
/// Accounts are created at registration and never deleted in the current
/// scope; the mutable fields are the password hash and the email address.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(100) NOT NULL UNIQUE,
///     email VARCHAR(100) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::user::{CreateUser, User};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let found = User::find_by_username(&pool, "alice").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Login name, unique across all users
    pub username: String,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash (PHC string format)
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login name
    pub username: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the username or email already exists (unique
    /// constraint violation) or the database operation fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by login name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Replaces the stored password hash
    ///
    /// Returns true if the user existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update_password(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replaces the email address
    ///
    /// Returns true if the user existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the new email collides with another account
    /// (unique constraint violation) or the database operation fails
    pub async fn update_email(pool: &PgPool, id: Uuid, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET email = $2 WHERE id = $1")
            .bind(id)
            .bind(email)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let data = CreateUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
        };

        assert_eq!(data.username, "alice");
        assert_eq!(data.email, "alice@example.com");
    }

    // Database-backed tests live in tests/model_tests.rs.
}
