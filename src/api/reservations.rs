/// Reservation REST endpoints
///
/// GET  /reservations?date=YYYY-MM-DD   dashboard listing for a day
/// GET  /reservations?mobile_number=..  digit-normalized phone search
/// POST /reservations                   create (201)
/// GET  /reservations/{id}              read
/// PUT  /reservations/{id}              full update of the guest fields
/// PUT  /reservations/{id}/status       status transition

use crate::{
    api::{AppState, Data},
    error::{ApiError, ApiResult},
    reservations::{validate, Reservation, ReservationPayload, ReservationStatus},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

/// Request envelope; the payload rides under "data"
#[derive(Debug, Default, Deserialize)]
pub struct ReservationBody {
    #[serde(default)]
    pub data: ReservationPayload,
}

/// Body of a status-change request
#[derive(Debug, Default, Deserialize)]
pub struct StatusBody {
    #[serde(default)]
    pub data: StatusPayload,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusPayload {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
    pub mobile_number: Option<String>,
}

/// Create reservation management routes
pub fn create_reservation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations",
            get(list_reservations).post(create_reservation),
        )
        .route(
            "/reservations/{reservation_id}",
            get(read_reservation).put(update_reservation),
        )
        .route("/reservations/{reservation_id}/status", put(update_status))
}

/// List reservations for a date, or search by mobile number
async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Data<Vec<Reservation>>>> {
    if let Some(date) = query.date.as_deref() {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ApiError::Validation("date is not a date.".to_string()))?;
        let reservations = state.reservations.list_by_date(date).await?;
        return Ok(Json(Data { data: reservations }));
    }

    if let Some(mobile_number) = query.mobile_number.as_deref() {
        let reservations = state.reservations.search_by_mobile(mobile_number).await?;
        return Ok(Json(Data { data: reservations }));
    }

    Err(ApiError::Validation(
        "Either a date or a mobile_number query parameter is required.".to_string(),
    ))
}

/// Create a new reservation; always starts booked
async fn create_reservation(
    State(state): State<AppState>,
    Json(body): Json<ReservationBody>,
) -> ApiResult<(StatusCode, Json<Data<Reservation>>)> {
    let new = validate::validate_reservation(&body.data, Local::now().naive_local())?;
    let created = state.reservations.create(&new).await?;

    tracing::info!(
        "📅 Created reservation {} for {} {} ({} people)",
        created.reservation_id,
        created.first_name,
        created.last_name,
        created.people
    );

    Ok((StatusCode::CREATED, Json(Data { data: created })))
}

/// Read a single reservation
async fn read_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i64>,
) -> ApiResult<Json<Data<Reservation>>> {
    let reservation = state
        .reservations
        .read(reservation_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Reservation {reservation_id} does not exist."))
        })?;

    Ok(Json(Data { data: reservation }))
}

/// Rewrite the guest fields of an existing reservation
async fn update_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i64>,
    Json(body): Json<ReservationBody>,
) -> ApiResult<Json<Data<Reservation>>> {
    let existing = state
        .reservations
        .read(reservation_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Reservation {reservation_id} does not exist."))
        })?;

    // Finished reservations are immutable, full updates included
    if existing.status == ReservationStatus::Finished {
        return Err(ApiError::State(
            "a finished reservation cannot be updated.".to_string(),
        ));
    }

    let new = validate::validate_reservation(&body.data, Local::now().naive_local())?;
    let updated = state.reservations.update(reservation_id, &new).await?;

    Ok(Json(Data { data: updated }))
}

/// Change a reservation's status
async fn update_status(
    State(state): State<AppState>,
    Path(reservation_id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> ApiResult<Json<Data<Reservation>>> {
    let requested = body.data.status.as_deref().unwrap_or_default();
    let updated = state.workflow.update_status(reservation_id, requested).await?;

    Ok(Json(Data { data: updated }))
}
