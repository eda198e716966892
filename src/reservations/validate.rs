/// Reservation validation rules
///
/// An ordered sequence of pure checks run before any mutation; the first
/// violation wins and surfaces as a 400 with a message naming the field or
/// rule. On success the caller gets fully-typed fields back.

use crate::error::{ApiError, ApiResult};
use crate::reservations::types::{NewReservation, ReservationPayload, ReservationStatus};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Earliest and latest bookable time of day, inclusive
const OPENING: (u32, u32) = (10, 30);
const LAST_SEATING: (u32, u32) = (21, 30);

const INVALID_FORMAT: &str = "Invalid data format provided. Requires {string: [first_name, last_name, mobile_number], date: reservation_date, time: reservation_time, number: people}";

/// Validate a reservation payload against the booking rules
///
/// `now` is the caller's current local time; reservations must land strictly
/// after it. Passing it in keeps this function pure and testable.
pub fn validate_reservation(
    payload: &ReservationPayload,
    now: NaiveDateTime,
) -> ApiResult<NewReservation> {
    let text_fields = [
        ("first_name", &payload.first_name),
        ("last_name", &payload.last_name),
        ("mobile_number", &payload.mobile_number),
        ("reservation_date", &payload.reservation_date),
        ("reservation_time", &payload.reservation_time),
    ];

    // Presence first, field by field, so the message can name the offender
    for (name, value) in &text_fields {
        if value.is_none() {
            return Err(ApiError::Validation(format!("The {name} is missing")));
        }
    }
    if payload.people.is_none() {
        return Err(ApiError::Validation("The people is missing".to_string()));
    }

    // Then emptiness across the board, including a supplied status
    for (_, value) in &text_fields {
        if matches!(value, Some(text) if text.is_empty()) {
            return Err(ApiError::Validation(INVALID_FORMAT.to_string()));
        }
    }
    if payload.people.as_ref().is_some_and(is_falsy) {
        return Err(ApiError::Validation(INVALID_FORMAT.to_string()));
    }
    if matches!(&payload.status, Some(status) if status.is_empty()) {
        return Err(ApiError::Validation(INVALID_FORMAT.to_string()));
    }

    let people = match payload.people.as_ref().and_then(Value::as_i64) {
        Some(count) if count > 0 => count as u32,
        _ => {
            return Err(ApiError::Validation(
                "Needs to be a number, people is not a number.".to_string(),
            ))
        }
    };

    let date_text = payload.reservation_date.as_deref().unwrap_or_default();
    let reservation_date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
        .map_err(|_| ApiError::Validation("reservation_date is not a date.".to_string()))?;

    // Closed on Tuesdays. The weekday comes from the calendar date itself,
    // never from a timezone-shifted instant.
    if reservation_date.weekday() == Weekday::Tue {
        return Err(ApiError::Validation(
            "Reservations cannot be made on a Tuesday, the restaurant is closed.".to_string(),
        ));
    }

    let time_text = payload.reservation_time.as_deref().unwrap_or_default();
    let parsed_time = NaiveTime::parse_from_str(time_text, TIME_FORMAT);

    // The future check only makes sense for a well-formed time; a malformed
    // one falls through to the format error below.
    if let Ok(time) = parsed_time {
        if reservation_date.and_time(time) <= now {
            return Err(ApiError::Validation(
                "Reservations must be made for a future date.".to_string(),
            ));
        }
    }

    let reservation_time = parsed_time
        .map_err(|_| ApiError::Validation("reservation_time is not a time.".to_string()))?;

    let clock = (reservation_time.hour(), reservation_time.minute());
    if clock < OPENING || clock > LAST_SEATING {
        return Err(ApiError::Validation(
            "Reservations cannot be made before 10:30am or after 9:30pm.".to_string(),
        ));
    }

    // Clients never choose an initial status other than booked
    if let Some(status) = payload.status.as_deref() {
        if status != ReservationStatus::Booked.as_str() {
            return Err(ApiError::Validation(format!(
                "'status' field cannot be {status}"
            )));
        }
    }

    Ok(NewReservation {
        first_name: payload.first_name.clone().unwrap_or_default(),
        last_name: payload.last_name.clone().unwrap_or_default(),
        mobile_number: payload.mobile_number.clone().unwrap_or_default(),
        reservation_date,
        reservation_time,
        people,
    })
}

/// Validate a requested status change against the current status
///
/// The requested value must be one of the four known statuses, and a
/// reservation that has finished never changes again.
pub fn validate_status_change(
    current: ReservationStatus,
    requested: &str,
) -> ApiResult<ReservationStatus> {
    let next = ReservationStatus::parse(requested)
        .ok_or_else(|| ApiError::Validation("unknown status.".to_string()))?;

    if current == ReservationStatus::Finished {
        return Err(ApiError::State(
            "a finished reservation cannot be updated.".to_string(),
        ));
    }

    Ok(next)
}

/// JSON falsiness: null, false, zero, or the empty string
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
