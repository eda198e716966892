/// Core reservation type definitions
///
/// A reservation is the unit the restaurant books against: guest identity,
/// party size, a date and a time, and a lifecycle status. Records are
/// serialized to JSON for the HTTP surface and stored as rows in SQLite.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of a reservation
///
/// A closed enumeration so illegal states are unrepresentable: `booked`
/// moves to `seated` and then `finished`, with `cancelled` reachable from
/// `booked` or `seated`. Only `finished` blocks further updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Finished,
    Cancelled,
}

impl ReservationStatus {
    /// Wire and column representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Booked => "booked",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Finished => "finished",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a client-supplied status string; None for anything outside the
    /// four known values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "booked" => Some(ReservationStatus::Booked),
            "seated" => Some(ReservationStatus::Seated),
            "finished" => Some(ReservationStatus::Finished),
            "cancelled" => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored reservation record
#[derive(Debug, Clone, Serialize)]
pub struct Reservation {
    pub reservation_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub reservation_time: NaiveTime,
    pub people: u32,
    pub status: ReservationStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated reservation fields, ready for insert or full update
///
/// Produced by the validation pipeline; downstream code never re-parses.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: u32,
}

/// Incoming reservation fields, before validation
///
/// Every field is optional so the validator can name the one that is
/// missing. `people` stays a raw JSON value: a numeric string must be
/// rejected with the field message, not a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_number: Option<String>,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub people: Option<Value>,
    pub status: Option<String>,
}

/// `HH:MM` serde codec for reservation times (no seconds on the wire)
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&text, FORMAT).map_err(serde::de::Error::custom)
    }
}
