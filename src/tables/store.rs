/// SQLite persistence for dining tables
///
/// CRUD for the tables collection. Occupancy is derived from the
/// reservation link at row-mapping time. Linking and unlinking themselves
/// are owned by the seating workflow, which pairs them with the reservation
/// status write in one transaction.

use crate::tables::types::{NewTable, Table};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Table store over a shared connection pool
#[derive(Debug, Clone)]
pub struct TableStore {
    pool: SqlitePool,
}

impl TableStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new table, created unoccupied
    pub async fn create(&self, new: &NewTable) -> Result<Table, sqlx::Error> {
        let result = sqlx::query("INSERT INTO tables (table_name, capacity) VALUES (?, ?)")
            .bind(&new.table_name)
            .bind(new.capacity as i64)
            .execute(&self.pool)
            .await?;

        let table_id = result.last_insert_rowid();
        self.read(table_id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Fetch a table by id
    pub async fn read(&self, table_id: i64) -> Result<Option<Table>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM tables WHERE table_id = ?")
            .bind(table_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| table_from_row(&row)).transpose()
    }

    /// All tables, ordered by name
    pub async fn list(&self) -> Result<Vec<Table>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM tables ORDER BY table_name ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(table_from_row).collect()
    }

    /// Hard-delete a table; callers must ensure it is unoccupied first
    pub async fn delete(&self, table_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tables WHERE table_id = ?")
            .bind(table_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn table_from_row(row: &SqliteRow) -> Result<Table, sqlx::Error> {
    let capacity: i64 = row.try_get("capacity")?;
    let reservation_id: Option<i64> = row.try_get("reservation_id")?;

    Ok(Table {
        table_id: row.try_get("table_id")?,
        table_name: row.try_get("table_name")?,
        capacity: capacity as u32,
        reservation_id,
        occupied: reservation_id.is_some(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
