/// Seatwell: restaurant reservation and table seating backend
///
/// Tracks reservations and dining tables, enforces the booking rules
/// (business hours, day closures, capacity matching), and runs the seating
/// workflow that couples reservation status to table occupancy.

// Core configuration and setup
pub mod config;

// Database pool and schema
pub mod db;

// Error taxonomy for the HTTP boundary
pub mod error;

// Reservation management layer - types, validation, persistence
pub mod reservations;

// Table management layer - types, validation, persistence
pub mod tables;

// Seating workflow - the reservation/table state machine
pub mod workflow;

// HTTP API layer - REST endpoints for reservations and tables
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use error::{ApiError, ApiResult};
pub use reservations::{Reservation, ReservationStatus};
pub use server::{create_app, start_server};
pub use tables::Table;
pub use workflow::SeatingWorkflow;
