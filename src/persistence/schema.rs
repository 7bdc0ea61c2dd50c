//! `SQLite` schema bootstrap logic.
//!
//! The table definition uses `CREATE TABLE IF NOT EXISTS` — safe to
//! re-run on every server startup. Produces a convergent result.

use sqlx::SqlitePool;

use crate::Result;

/// Apply the table definitions to the connected `SQLite` database.
///
/// Idempotent; called on every startup.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS task (
    id          TEXT PRIMARY KEY NOT NULL,
    title       TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    due_date    TEXT NOT NULL,
    category    TEXT NOT NULL CHECK(category IN ('WORK','PERSONAL')),
    status      TEXT NOT NULL CHECK(status IN ('TO-DO','IN-PROGRESS','COMPLETED')),
    user_id     TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    activities  TEXT NOT NULL DEFAULT '[]',
    attachment  TEXT
);

CREATE INDEX IF NOT EXISTS idx_task_user ON task(user_id);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
