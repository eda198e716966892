/// SQLite database setup
///
/// Creates the connection pool and the reservations/tables schema. Schema
/// creation is idempotent (IF NOT EXISTS), safe to run on every startup.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::Path;

/// Open (or create) the database file under the configured data directory
pub async fn connect(data_dir: &str) -> Result<SqlitePool> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create data directory '{}': {}", data_dir, e))?;
    let db_path = Path::new(data_dir).join("seatwell.db");

    tracing::info!("🗄️ Opening database: {}", db_path.display());

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Initialize the reservations and tables schema
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            reservation_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            mobile_number TEXT NOT NULL,
            reservation_date TEXT NOT NULL,
            reservation_time TEXT NOT NULL,
            people INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'booked',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tables (
            table_id INTEGER PRIMARY KEY AUTOINCREMENT,
            table_name TEXT NOT NULL,
            capacity INTEGER NOT NULL,
            reservation_id INTEGER REFERENCES reservations(reservation_id),
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes for the two hot lookups: dashboard-by-date and list-by-name
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_reservations_date ON reservations(reservation_date)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tables_name ON tables(table_name)")
        .execute(pool)
        .await?;

    Ok(())
}
