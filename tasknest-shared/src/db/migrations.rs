/// Database migration runner
///
/// Migrations live in `migrations/` at the workspace root and are embedded
/// into the binary with `sqlx::migrate!`, so the schema is created
/// automatically on startup against an empty database.
use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Already-applied migrations are skipped; sqlx tracks state in the
/// `_sqlx_migrations` table.
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the connection is lost
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
