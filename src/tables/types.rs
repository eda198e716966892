/// Core table type definitions
///
/// A dining table has a name, a seating capacity, and at most one linked
/// reservation. Occupancy is derived from the link rather than stored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored dining table record
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub table_id: i64,
    pub table_name: String,
    pub capacity: u32,
    /// Reservation currently seated here, if any
    pub reservation_id: Option<i64>,
    /// Derived: true exactly when reservation_id is set
    pub occupied: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated table fields, ready for insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewTable {
    pub table_name: String,
    pub capacity: u32,
}

/// Incoming table fields, before validation
///
/// `capacity` stays a raw JSON value so a numeric string gets the field
/// message instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TablePayload {
    pub table_name: Option<String>,
    pub capacity: Option<Value>,
}

/// Body of a seating request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeatPayload {
    pub reservation_id: Option<i64>,
}
