use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    ensure_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    pool
}

/// The uniqueness rules live here as database constraints, so concurrent
/// check-then-insert races cannot produce duplicate employees or duplicate
/// marks for the same (employee, date) pair.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          TEXT PRIMARY KEY,
            employee_id TEXT NOT NULL UNIQUE,
            full_name   TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            department  TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id          TEXT PRIMARY KEY,
            employee_id TEXT NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            date        TEXT NOT NULL,
            status      TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            UNIQUE (employee_id, date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// In-memory pool for tests. A single connection, because every new
/// `:memory:` connection would otherwise open its own empty database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    ensure_schema(&pool).await.unwrap();
    pool
}
