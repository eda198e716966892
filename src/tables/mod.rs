/// Table Management Layer
///
/// This module handles dining tables:
/// - Type definitions (Table, payloads)
/// - Creation and seating-precondition validation
/// - SQLite persistence with sqlx

// Core table type definitions
pub mod types;

// Creation and seating validation
pub mod validate;

// SQLite persistence layer
pub mod store;

// Re-export commonly used types
pub use store::TableStore;
pub use types::{NewTable, SeatPayload, Table, TablePayload};
