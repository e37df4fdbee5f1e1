/// Active to-do items
///
/// A todo is owned by exactly one user. Marking a todo done moves it into the
/// archive (see [`crate::models::archive`]); the two tables never hold the
/// same logical item at once, because the transition happens inside a single
/// database transaction.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(50) NOT NULL,
///     description VARCHAR(100) NOT NULL,
///     priority INTEGER NOT NULL,
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_on DATE NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::todo::{CreateTodo, Todo};
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
/// # async fn example(pool: PgPool, owner_id: Uuid) -> Result<(), sqlx::Error> {
/// let todo = Todo::create(&pool, CreateTodo {
///     title: "Buy milk".to_string(),
///     description: "2%".to_string(),
///     priority: 3,
///     owner_id,
/// }).await?;
///
/// // Mark it done: the row moves to the archive atomically.
/// let archived = Todo::mark_done(&pool, todo.id, owner_id).await?;
/// assert!(archived.is_some());
/// # Ok(())
/// # }
/// ```
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::archive::{ArchivedTask, NewArchivedTask};

/// Maximum title length, mirrored by the VARCHAR(50) column
pub const MAX_TITLE_LEN: usize = 50;

/// Maximum description length, mirrored by the VARCHAR(100) column
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// An active to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Unique todo ID
    pub id: Uuid,

    /// Short title, at most 50 characters
    pub title: String,

    /// Free-form description, at most 100 characters
    pub description: String,

    /// Integer priority; lower sorts first, no enforced range
    pub priority: i32,

    /// Owning user
    pub owner_id: Uuid,

    /// Calendar date the item was created
    pub created_on: NaiveDate,
}

/// Input for creating a new todo
///
/// The creation date is stamped by [`Todo::create`], not supplied by the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    /// Short title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Integer priority
    pub priority: i32,

    /// Owning user
    pub owner_id: Uuid,
}

/// Mutable fields of a todo, overwritten as a unit by [`Todo::update`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    /// New title
    pub title: String,

    /// New description
    pub description: String,

    /// New priority
    pub priority: i32,
}

impl Todo {
    /// Creates a new todo, stamped with today's calendar date
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist (foreign key violation)
    /// or the database operation fails
    pub async fn create(pool: &PgPool, data: CreateTodo) -> Result<Self, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description, priority, owner_id, created_on)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, priority, owner_id, created_on
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.owner_id)
        .bind(Utc::now().date_naive())
        .fetch_one(pool)
        .await?;

        Ok(todo)
    }

    /// Inserts a todo with an explicit creation date
    ///
    /// Used by archive undo, which must preserve the original date.
    pub(crate) async fn insert_with_date(
        tx: &mut Transaction<'_, Postgres>,
        title: &str,
        description: &str,
        priority: i32,
        owner_id: Uuid,
        created_on: NaiveDate,
    ) -> Result<Self, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description, priority, owner_id, created_on)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, priority, owner_id, created_on
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(owner_id)
        .bind(created_on)
        .fetch_one(&mut **tx)
        .await?;

        Ok(todo)
    }

    /// Finds a todo by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, priority, owner_id, created_on
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Lists all active todos, priority ascending
    ///
    /// Ties in priority are broken by creation date then id, so the ordering
    /// is deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, priority, owner_id, created_on
            FROM todos
            ORDER BY priority ASC, created_on ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(todos)
    }

    /// Overwrites title, description, and priority
    ///
    /// Scoped to the owner: a guessed id belonging to another user behaves
    /// exactly like a missing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        data: UpdateTodo,
    ) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = $3, description = $4, priority = $5
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, description, priority, owner_id, created_on
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Deletes a todo outright
    ///
    /// Returns true if a row owned by `owner_id` was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marks a todo done, moving it into the archive
    ///
    /// Copies title, description, priority, owner, and creation date into a
    /// fresh archive row stamped with today's completion date, then deletes
    /// the source row. Both writes happen in one transaction, so the item is
    /// never visible in both tables.
    ///
    /// Returns `None` when the id does not resolve for this owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn mark_done(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ArchivedTask>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, priority, owner_id, created_on
            FROM todos
            WHERE id = $1 AND owner_id = $2
            FOR UPDATE
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(todo) = todo else {
            return Ok(None);
        };

        let data = NewArchivedTask::from_todo(&todo, Utc::now().date_naive());
        let archived = ArchivedTask::insert(&mut tx, data).await?;

        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(archived))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_limits_match_schema() {
        assert_eq!(MAX_TITLE_LEN, 50);
        assert_eq!(MAX_DESCRIPTION_LEN, 100);
    }

    #[test]
    fn test_archive_copy_preserves_fields() {
        let todo = Todo {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            priority: 3,
            owner_id: Uuid::new_v4(),
            created_on: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        };

        let finished = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let archived = NewArchivedTask::from_todo(&todo, finished);

        assert_eq!(archived.title, todo.title);
        assert_eq!(archived.description, todo.description);
        assert_eq!(archived.priority, todo.priority);
        assert_eq!(archived.owner_id, todo.owner_id);
        assert_eq!(archived.created_on, todo.created_on);
        assert_eq!(archived.finished_at, finished);
    }
}
