/// Archived (completed) tasks
///
/// Rows arrive here when a todo is marked done and leave either by outright
/// deletion or by undo, which moves the item back to the active table with
/// its original creation date and a fresh id.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE archive (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(50) NOT NULL,
///     description VARCHAR(100) NOT NULL,
///     priority INTEGER NOT NULL,
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_on DATE NOT NULL,
///     finished_at DATE NOT NULL
/// );
/// ```
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::todo::Todo;

/// A completed to-do item, retained for history
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArchivedTask {
    /// Unique archive ID (not the id of the source todo)
    pub id: Uuid,

    /// Title copied from the source todo
    pub title: String,

    /// Description copied from the source todo
    pub description: String,

    /// Priority copied from the source todo
    pub priority: i32,

    /// Owning user
    pub owner_id: Uuid,

    /// Original creation date of the source todo
    pub created_on: NaiveDate,

    /// Calendar date the item was marked done
    pub finished_at: NaiveDate,
}

/// Field set inserted into the archive when a todo is marked done
#[derive(Debug, Clone)]
pub struct NewArchivedTask {
    /// Title copied from the source todo
    pub title: String,

    /// Description copied from the source todo
    pub description: String,

    /// Priority copied from the source todo
    pub priority: i32,

    /// Owning user
    pub owner_id: Uuid,

    /// Original creation date
    pub created_on: NaiveDate,

    /// Completion date
    pub finished_at: NaiveDate,
}

impl NewArchivedTask {
    /// Copies every field of a todo and stamps the completion date
    pub fn from_todo(todo: &Todo, finished_at: NaiveDate) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            priority: todo.priority,
            owner_id: todo.owner_id,
            created_on: todo.created_on,
            finished_at,
        }
    }
}

impl ArchivedTask {
    /// Inserts an archive row inside an open transaction
    pub(crate) async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        data: NewArchivedTask,
    ) -> Result<Self, sqlx::Error> {
        let archived = sqlx::query_as::<_, ArchivedTask>(
            r#"
            INSERT INTO archive (title, description, priority, owner_id, created_on, finished_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, priority, owner_id, created_on, finished_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.owner_id)
        .bind(data.created_on)
        .bind(data.finished_at)
        .fetch_one(&mut **tx)
        .await?;

        Ok(archived)
    }

    /// Finds an archived task by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let archived = sqlx::query_as::<_, ArchivedTask>(
            r#"
            SELECT id, title, description, priority, owner_id, created_on, finished_at
            FROM archive
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(archived)
    }

    /// Lists the whole archive, completion date ascending
    ///
    /// Ties are broken by id for deterministic ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let archived = sqlx::query_as::<_, ArchivedTask>(
            r#"
            SELECT id, title, description, priority, owner_id, created_on, finished_at
            FROM archive
            ORDER BY finished_at ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(archived)
    }

    /// Deletes an archived task outright
    ///
    /// Returns true if a row owned by `owner_id` was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM archive WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Undoes archival, moving the item back to the active table
    ///
    /// Inverse of [`Todo::mark_done`]: copies every field except the
    /// completion date into a fresh todo row (preserving the original
    /// creation date), then deletes the archive row, all in one transaction.
    ///
    /// Returns `None` when the id does not resolve for this owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn restore(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let archived = sqlx::query_as::<_, ArchivedTask>(
            r#"
            SELECT id, title, description, priority, owner_id, created_on, finished_at
            FROM archive
            WHERE id = $1 AND owner_id = $2
            FOR UPDATE
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(archived) = archived else {
            return Ok(None);
        };

        let todo = Todo::insert_with_date(
            &mut tx,
            &archived.title,
            &archived.description,
            archived.priority,
            archived.owner_id,
            archived.created_on,
        )
        .await?;

        sqlx::query("DELETE FROM archive WHERE id = $1")
            .bind(archived.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(todo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_todo_stamps_completion_date() {
        let todo = Todo {
            id: Uuid::new_v4(),
            title: "Water plants".to_string(),
            description: "balcony only".to_string(),
            priority: 1,
            owner_id: Uuid::new_v4(),
            created_on: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        };

        let finished = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let data = NewArchivedTask::from_todo(&todo, finished);

        assert_eq!(data.finished_at, finished);
        assert_eq!(data.created_on, todo.created_on);
    }
}
