/// Table validation rules
///
/// Creation checks for table payloads, plus the pure preconditions for the
/// seat and finish operations. The workflow fetches the records; these
/// functions judge them.

use crate::error::{ApiError, ApiResult};
use crate::reservations::types::{Reservation, ReservationStatus};
use crate::tables::types::{NewTable, Table, TablePayload};
use serde_json::Value;

const INVALID_FORMAT: &str =
    "Invalid data format provided. Requires {string: [table_name, capacity]}";

/// Validate a table creation payload
pub fn validate_table(payload: &TablePayload) -> ApiResult<NewTable> {
    if payload.table_name.is_none() {
        return Err(ApiError::Validation(
            "The table_name field is missing".to_string(),
        ));
    }
    if payload.capacity.is_none() {
        return Err(ApiError::Validation(
            "The capacity field is missing".to_string(),
        ));
    }

    let table_name = payload.table_name.clone().unwrap_or_default();
    if table_name.is_empty() {
        return Err(ApiError::Validation("table_name value is missing.".to_string()));
    }
    if payload.capacity.as_ref().is_some_and(is_falsy) {
        return Err(ApiError::Validation(INVALID_FORMAT.to_string()));
    }

    if table_name.chars().count() < 2 {
        return Err(ApiError::Validation(
            "Must include a table_name longer than one character.".to_string(),
        ));
    }

    let capacity = match payload.capacity.as_ref().and_then(Value::as_i64) {
        Some(seats) if seats > 0 => seats as u32,
        _ => {
            return Err(ApiError::Validation(
                "Needs to be a number, capacity is not a number.".to_string(),
            ))
        }
    };

    Ok(NewTable {
        table_name,
        capacity,
    })
}

/// Preconditions for seating a reservation at a table
///
/// The party must fit, the table must be free, and the reservation must not
/// already be seated somewhere.
pub fn validate_seat(table: &Table, reservation: &Reservation) -> ApiResult<()> {
    if reservation.people > table.capacity {
        return Err(ApiError::Validation(
            "Table does not have sufficient capacity.".to_string(),
        ));
    }
    if table.reservation_id.is_some() {
        return Err(ApiError::Validation("Table is occupied.".to_string()));
    }
    if reservation.status == ReservationStatus::Seated {
        return Err(ApiError::State(
            "This reservation has already been seated.".to_string(),
        ));
    }
    Ok(())
}

/// Precondition for finishing a table; returns the seated reservation id
pub fn validate_finish(table: &Table) -> ApiResult<i64> {
    table
        .reservation_id
        .ok_or_else(|| ApiError::Validation("Table is not occupied.".to_string()))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::json;

    fn table(capacity: u32, reservation_id: Option<i64>) -> Table {
        Table {
            table_id: 1,
            table_name: "Bar #1".to_string(),
            capacity,
            reservation_id,
            occupied: reservation_id.is_some(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn reservation(people: u32, status: ReservationStatus) -> Reservation {
        Reservation {
            reservation_id: 9,
            first_name: "Rick".to_string(),
            last_name: "Sanchez".to_string(),
            mobile_number: "555-0100".to_string(),
            reservation_date: NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
            reservation_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            people,
            status,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn accepts_a_valid_table_payload() {
        let new = validate_table(&TablePayload {
            table_name: Some("Patio 2".to_string()),
            capacity: Some(json!(6)),
        })
        .unwrap();
        assert_eq!(new.table_name, "Patio 2");
        assert_eq!(new.capacity, 6);
    }

    #[test]
    fn names_missing_table_fields() {
        let err = validate_table(&TablePayload::default()).unwrap_err();
        assert_eq!(err.to_string(), "The table_name field is missing");

        let err = validate_table(&TablePayload {
            table_name: Some("Patio 2".to_string()),
            capacity: None,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "The capacity field is missing");
    }

    #[test]
    fn rejects_single_character_names() {
        let err = validate_table(&TablePayload {
            table_name: Some("A".to_string()),
            capacity: Some(json!(4)),
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Must include a table_name longer than one character."
        );
    }

    #[test]
    fn rejects_zero_and_non_numeric_capacity() {
        let err = validate_table(&TablePayload {
            table_name: Some("Patio 2".to_string()),
            capacity: Some(json!(0)),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), INVALID_FORMAT);

        for bad in [json!("4"), json!(-2), json!(2.5)] {
            let err = validate_table(&TablePayload {
                table_name: Some("Patio 2".to_string()),
                capacity: Some(bad),
            })
            .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Needs to be a number, capacity is not a number."
            );
        }
    }

    #[test]
    fn seat_rejects_parties_larger_than_the_table() {
        let err = validate_seat(&table(2, None), &reservation(6, ReservationStatus::Booked))
            .unwrap_err();
        assert_eq!(err.to_string(), "Table does not have sufficient capacity.");
    }

    #[test]
    fn seat_rejects_occupied_tables() {
        let err = validate_seat(&table(4, Some(3)), &reservation(2, ReservationStatus::Booked))
            .unwrap_err();
        assert_eq!(err.to_string(), "Table is occupied.");
    }

    #[test]
    fn seat_rejects_double_seating() {
        let err = validate_seat(&table(4, None), &reservation(2, ReservationStatus::Seated))
            .unwrap_err();
        assert_eq!(err.to_string(), "This reservation has already been seated.");
    }

    #[test]
    fn seat_accepts_a_fitting_party_at_a_free_table() {
        assert!(validate_seat(&table(4, None), &reservation(4, ReservationStatus::Booked)).is_ok());
    }

    #[test]
    fn finish_requires_an_occupied_table() {
        assert_eq!(validate_finish(&table(4, Some(9))).unwrap(), 9);
        let err = validate_finish(&table(4, None)).unwrap_err();
        assert_eq!(err.to_string(), "Table is not occupied.");
    }
}
