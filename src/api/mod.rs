/// HTTP API Layer
///
/// This module provides the REST endpoints for reservations and tables.
/// Handlers stay thin: extract, validate, call the store or workflow, wrap
/// the result in the response envelope.

use crate::reservations::ReservationStore;
use crate::tables::TableStore;
use crate::workflow::SeatingWorkflow;
use serde::Serialize;
use sqlx::SqlitePool;

// Reservation endpoints (list/search, create, read, update, status)
pub mod reservations;

// Table endpoints (list, create, seat, finish, delete)
pub mod tables;

// Re-export router builders
pub use reservations::create_reservation_routes;
pub use tables::create_table_routes;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Reservation persistence
    pub reservations: ReservationStore,
    /// Table persistence
    pub tables: TableStore,
    /// Seating state machine over both stores
    pub workflow: SeatingWorkflow,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            reservations: ReservationStore::new(pool.clone()),
            tables: TableStore::new(pool.clone()),
            workflow: SeatingWorkflow::new(pool),
        }
    }
}

/// Success envelope; every payload rides under "data"
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}
