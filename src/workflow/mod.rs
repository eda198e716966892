/// Seating workflow
///
/// The state machine coupling reservation status to table occupancy.
/// Seat and Finish each touch two rows — the table link and the reservation
/// status — and run both writes in a single transaction, so a table is never
/// observed linking a reservation that is not marked seated.

use crate::error::{ApiError, ApiResult};
use crate::reservations::types::{Reservation, ReservationStatus};
use crate::reservations::{validate as reservation_rules, ReservationStore};
use crate::tables::{validate as table_rules, Table, TableStore};
use sqlx::SqlitePool;

/// Workflow operations over both stores
#[derive(Debug, Clone)]
pub struct SeatingWorkflow {
    pool: SqlitePool,
    reservations: ReservationStore,
    tables: TableStore,
}

impl SeatingWorkflow {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            reservations: ReservationStore::new(pool.clone()),
            tables: TableStore::new(pool.clone()),
            pool,
        }
    }

    /// Seat a reservation at a table
    ///
    /// Validates the pairing, then links the table and marks the reservation
    /// seated in one transaction.
    pub async fn seat(&self, table_id: i64, reservation_id: i64) -> ApiResult<Table> {
        let table = self
            .tables
            .read(table_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Table {table_id} does not exist.")))?;
        let reservation = self.reservations.read(reservation_id).await?.ok_or_else(|| {
            ApiError::NotFound(format!("Reservation {reservation_id} does not exist."))
        })?;

        table_rules::validate_seat(&table, &reservation)?;

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "UPDATE reservations SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE reservation_id = ?",
        )
        .bind(ReservationStatus::Seated.as_str())
        .bind(reservation_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "UPDATE tables SET reservation_id = ?, updated_at = CURRENT_TIMESTAMP WHERE table_id = ?",
        )
        .bind(reservation_id)
        .bind(table_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(
            "🍽️ Seated reservation {} at table {} ({})",
            reservation_id,
            table_id,
            table.table_name
        );

        self.tables
            .read(table_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Table {table_id} does not exist.")))
    }

    /// Finish a seated table
    ///
    /// Clears the table link and marks the reservation finished in one
    /// transaction.
    pub async fn finish(&self, table_id: i64) -> ApiResult<Table> {
        let table = self
            .tables
            .read(table_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Table {table_id} does not exist.")))?;

        let reservation_id = table_rules::validate_finish(&table)?;

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "UPDATE tables SET reservation_id = NULL, updated_at = CURRENT_TIMESTAMP WHERE table_id = ?",
        )
        .bind(table_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "UPDATE reservations SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE reservation_id = ?",
        )
        .bind(ReservationStatus::Finished.as_str())
        .bind(reservation_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(
            "🧹 Finished reservation {} at table {}",
            reservation_id,
            table_id
        );

        self.tables
            .read(table_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Table {table_id} does not exist.")))
    }

    /// Apply a generic status change to a reservation
    pub async fn update_status(
        &self,
        reservation_id: i64,
        requested: &str,
    ) -> ApiResult<Reservation> {
        let reservation = self.reservations.read(reservation_id).await?.ok_or_else(|| {
            ApiError::NotFound(format!("Reservation {reservation_id} does not exist."))
        })?;

        let next = reservation_rules::validate_status_change(reservation.status, requested)?;
        let updated = self.reservations.update_status(reservation_id, next).await?;
        Ok(updated)
    }

    /// Cancel a reservation
    ///
    /// Only the reservation status changes. A table seated with this
    /// reservation keeps its link until a finish call clears it; releasing
    /// the table is the caller's responsibility.
    pub async fn cancel(&self, reservation_id: i64) -> ApiResult<Reservation> {
        self.update_status(reservation_id, ReservationStatus::Cancelled.as_str())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::reservations::NewReservation;
    use crate::tables::NewTable;
    use chrono::{NaiveDate, NaiveTime};
    use sqlx::sqlite::SqlitePoolOptions;

    struct Fixture {
        workflow: SeatingWorkflow,
        reservations: ReservationStore,
        tables: TableStore,
    }

    async fn fixture() -> Fixture {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::init_schema(&pool).await.unwrap();
        Fixture {
            workflow: SeatingWorkflow::new(pool.clone()),
            reservations: ReservationStore::new(pool.clone()),
            tables: TableStore::new(pool),
        }
    }

    async fn booked_party(fixture: &Fixture, people: u32) -> Reservation {
        fixture
            .reservations
            .create(&NewReservation {
                first_name: "Rick".to_string(),
                last_name: "Sanchez".to_string(),
                mobile_number: "555-0100".to_string(),
                reservation_date: NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
                reservation_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                people,
            })
            .await
            .unwrap()
    }

    async fn free_table(fixture: &Fixture, capacity: u32) -> Table {
        fixture
            .tables
            .create(&NewTable {
                table_name: "Bar #1".to_string(),
                capacity,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn seat_links_the_table_and_marks_the_reservation_seated() {
        let fx = fixture().await;
        let reservation = booked_party(&fx, 2).await;
        let table = free_table(&fx, 4).await;

        let seated = fx
            .workflow
            .seat(table.table_id, reservation.reservation_id)
            .await
            .unwrap();

        assert_eq!(seated.reservation_id, Some(reservation.reservation_id));
        assert!(seated.occupied);

        let reservation = fx
            .reservations
            .read(reservation.reservation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reservation.status, ReservationStatus::Seated);
    }

    #[tokio::test]
    async fn seat_rejects_oversized_parties_and_mutates_nothing() {
        let fx = fixture().await;
        let reservation = booked_party(&fx, 6).await;
        let table = free_table(&fx, 2).await;

        let err = fx
            .workflow
            .seat(table.table_id, reservation.reservation_id)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Table does not have sufficient capacity.");

        let table = fx.tables.read(table.table_id).await.unwrap().unwrap();
        assert!(table.reservation_id.is_none());
        let reservation = fx
            .reservations
            .read(reservation.reservation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reservation.status, ReservationStatus::Booked);
    }

    #[tokio::test]
    async fn seat_rejects_unknown_ids_with_not_found() {
        let fx = fixture().await;
        let table = free_table(&fx, 4).await;

        let err = fx.workflow.seat(table.table_id, 404).await.unwrap_err();
        assert_eq!(err.to_string(), "Reservation 404 does not exist.");

        let reservation = booked_party(&fx, 2).await;
        let err = fx
            .workflow
            .seat(404, reservation.reservation_id)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Table 404 does not exist.");
    }

    #[tokio::test]
    async fn a_reservation_seats_at_most_one_table() {
        let fx = fixture().await;
        let reservation = booked_party(&fx, 2).await;
        let first = free_table(&fx, 4).await;
        let second = fx
            .tables
            .create(&NewTable {
                table_name: "Patio 2".to_string(),
                capacity: 4,
            })
            .await
            .unwrap();

        fx.workflow
            .seat(first.table_id, reservation.reservation_id)
            .await
            .unwrap();

        let err = fx
            .workflow
            .seat(second.table_id, reservation.reservation_id)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "This reservation has already been seated.");
    }

    #[tokio::test]
    async fn seat_then_finish_restores_the_table_and_finishes_the_reservation() {
        let fx = fixture().await;
        let reservation = booked_party(&fx, 2).await;
        let table = free_table(&fx, 4).await;

        fx.workflow
            .seat(table.table_id, reservation.reservation_id)
            .await
            .unwrap();
        let finished = fx.workflow.finish(table.table_id).await.unwrap();

        assert!(finished.reservation_id.is_none());
        assert!(!finished.occupied);

        let reservation = fx
            .reservations
            .read(reservation.reservation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reservation.status, ReservationStatus::Finished);
    }

    #[tokio::test]
    async fn finish_requires_an_occupied_table() {
        let fx = fixture().await;
        let table = free_table(&fx, 4).await;

        let err = fx.workflow.finish(table.table_id).await.unwrap_err();
        assert_eq!(err.to_string(), "Table is not occupied.");
    }

    #[tokio::test]
    async fn a_finished_table_frees_up_for_the_next_party() {
        let fx = fixture().await;
        let first = booked_party(&fx, 2).await;
        let table = free_table(&fx, 4).await;

        fx.workflow
            .seat(table.table_id, first.reservation_id)
            .await
            .unwrap();
        fx.workflow.finish(table.table_id).await.unwrap();

        let second = booked_party(&fx, 3).await;
        let seated = fx
            .workflow
            .seat(table.table_id, second.reservation_id)
            .await
            .unwrap();
        assert_eq!(seated.reservation_id, Some(second.reservation_id));
    }

    #[tokio::test]
    async fn finished_reservations_reject_further_updates_idempotently() {
        let fx = fixture().await;
        let reservation = booked_party(&fx, 2).await;
        let table = free_table(&fx, 4).await;
        fx.workflow
            .seat(table.table_id, reservation.reservation_id)
            .await
            .unwrap();
        fx.workflow.finish(table.table_id).await.unwrap();

        for _ in 0..2 {
            let err = fx
                .workflow
                .update_status(reservation.reservation_id, "seated")
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "a finished reservation cannot be updated.");
        }
    }

    #[tokio::test]
    async fn cancel_leaves_the_table_linkage_untouched() {
        let fx = fixture().await;
        let reservation = booked_party(&fx, 2).await;
        let table = free_table(&fx, 4).await;
        fx.workflow
            .seat(table.table_id, reservation.reservation_id)
            .await
            .unwrap();

        let cancelled = fx.workflow.cancel(reservation.reservation_id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        // The table still holds the link; only a finish call releases it.
        let table = fx.tables.read(table.table_id).await.unwrap().unwrap();
        assert_eq!(table.reservation_id, Some(reservation.reservation_id));
        assert!(table.occupied);
    }

    #[tokio::test]
    async fn update_status_404s_for_unknown_reservations() {
        let fx = fixture().await;
        let err = fx.workflow.update_status(42, "seated").await.unwrap_err();
        assert_eq!(err.to_string(), "Reservation 42 does not exist.");
    }
}
