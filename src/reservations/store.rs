/// SQLite persistence for reservations
///
/// Thin CRUD layer over the reservations table. Rows come back through
/// manual mapping so the date, time, and status columns land in their typed
/// forms; anything unparseable surfaces as a decode error.

use crate::reservations::types::{NewReservation, Reservation, ReservationStatus};
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Reservation store over a shared connection pool
#[derive(Debug, Clone)]
pub struct ReservationStore {
    pool: SqlitePool,
}

impl ReservationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new reservation; status always starts as booked
    pub async fn create(&self, new: &NewReservation) -> Result<Reservation, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO reservations
                (first_name, last_name, mobile_number, reservation_date, reservation_time, people, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.mobile_number)
        .bind(new.reservation_date.format(DATE_FORMAT).to_string())
        .bind(new.reservation_time.format(TIME_FORMAT).to_string())
        .bind(new.people as i64)
        .bind(ReservationStatus::Booked.as_str())
        .execute(&self.pool)
        .await?;

        let reservation_id = result.last_insert_rowid();
        self.read(reservation_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Fetch a reservation by id
    pub async fn read(&self, reservation_id: i64) -> Result<Option<Reservation>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM reservations WHERE reservation_id = ?")
            .bind(reservation_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| reservation_from_row(&row)).transpose()
    }

    /// Rewrite the guest fields of an existing reservation
    ///
    /// Status is never touched here; it only moves through the status
    /// operations.
    pub async fn update(
        &self,
        reservation_id: i64,
        new: &NewReservation,
    ) -> Result<Reservation, sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE reservations SET
                first_name = ?,
                last_name = ?,
                mobile_number = ?,
                reservation_date = ?,
                reservation_time = ?,
                people = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE reservation_id = ?
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.mobile_number)
        .bind(new.reservation_date.format(DATE_FORMAT).to_string())
        .bind(new.reservation_time.format(TIME_FORMAT).to_string())
        .bind(new.people as i64)
        .bind(reservation_id)
        .execute(&self.pool)
        .await?;

        self.read(reservation_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Set the status of an existing reservation
    pub async fn update_status(
        &self,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> Result<Reservation, sqlx::Error> {
        sqlx::query(
            "UPDATE reservations SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE reservation_id = ?",
        )
        .bind(status.as_str())
        .bind(reservation_id)
        .execute(&self.pool)
        .await?;

        self.read(reservation_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// All reservations for a date except finished ones, earliest first
    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Reservation>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM reservations
            WHERE reservation_date = ? AND status != 'finished'
            ORDER BY reservation_time ASC
            "#,
        )
        .bind(date.format(DATE_FORMAT).to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(reservation_from_row).collect()
    }

    /// Reservations whose mobile number contains the search term, both sides
    /// reduced to digits, ordered by date
    ///
    /// SQLite has no translate(), so the normalization happens here rather
    /// than in the query.
    pub async fn search_by_mobile(&self, term: &str) -> Result<Vec<Reservation>, sqlx::Error> {
        let needle = digits(term);

        let rows = sqlx::query("SELECT * FROM reservations ORDER BY reservation_date")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(reservation_from_row)
            .filter(|result| match result {
                Ok(reservation) => digits(&reservation.mobile_number).contains(&needle),
                Err(_) => true,
            })
            .collect()
    }
}

/// Strip everything but ASCII digits from a phone number
fn digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn reservation_from_row(row: &SqliteRow) -> Result<Reservation, sqlx::Error> {
    let date_text: String = row.try_get("reservation_date")?;
    let time_text: String = row.try_get("reservation_time")?;
    let status_text: String = row.try_get("status")?;
    let people: i64 = row.try_get("people")?;

    let reservation_date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    let reservation_time = chrono::NaiveTime::parse_from_str(&time_text, TIME_FORMAT)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    let status = ReservationStatus::parse(&status_text).ok_or_else(|| {
        sqlx::Error::Decode(format!("unknown reservation status: {status_text}").into())
    })?;

    Ok(Reservation {
        reservation_id: row.try_get("reservation_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        mobile_number: row.try_get("mobile_number")?,
        reservation_date,
        reservation_time,
        people: people as u32,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
