/// Reservation Management Layer
///
/// This module handles reservation records end to end:
/// - Type definitions (Reservation, ReservationStatus, payloads)
/// - Ordered validation of incoming payloads
/// - SQLite persistence with sqlx

// Core reservation type definitions
pub mod types;

// Booking-rule validation pipeline
pub mod validate;

// SQLite persistence layer
pub mod store;

// Re-export commonly used types
pub use store::ReservationStore;
pub use types::{NewReservation, Reservation, ReservationPayload, ReservationStatus};
