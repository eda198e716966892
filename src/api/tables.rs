/// Table REST endpoints
///
/// GET    /tables              list, ordered by name
/// POST   /tables              create (201)
/// PUT    /tables/{id}/seat    seat a reservation at the table
/// DELETE /tables/{id}/seat    finish the table, freeing it
/// DELETE /tables/{id}         hard-delete an unoccupied table

use crate::{
    api::{AppState, Data},
    error::{ApiError, ApiResult},
    tables::{validate, SeatPayload, Table, TablePayload},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, put},
    Router,
};
use serde::Deserialize;

/// Request envelope for table creation
#[derive(Debug, Default, Deserialize)]
pub struct TableBody {
    #[serde(default)]
    pub data: TablePayload,
}

/// Request envelope for seating
#[derive(Debug, Default, Deserialize)]
pub struct SeatBody {
    #[serde(default)]
    pub data: SeatPayload,
}

/// Create table management routes
pub fn create_table_routes() -> Router<AppState> {
    Router::new()
        .route("/tables", get(list_tables).post(create_table))
        .route("/tables/{table_id}", delete(delete_table))
        .route("/tables/{table_id}/seat", put(seat_table).delete(finish_table))
}

/// List all tables, ordered by name
async fn list_tables(State(state): State<AppState>) -> ApiResult<Json<Data<Vec<Table>>>> {
    let tables = state.tables.list().await?;
    Ok(Json(Data { data: tables }))
}

/// Create a new table
async fn create_table(
    State(state): State<AppState>,
    Json(body): Json<TableBody>,
) -> ApiResult<(StatusCode, Json<Data<Table>>)> {
    let new = validate::validate_table(&body.data)?;
    let created = state.tables.create(&new).await?;

    tracing::info!(
        "🪑 Created table {} ({}, seats {})",
        created.table_id,
        created.table_name,
        created.capacity
    );

    Ok((StatusCode::CREATED, Json(Data { data: created })))
}

/// Seat a reservation at this table
async fn seat_table(
    State(state): State<AppState>,
    Path(table_id): Path<i64>,
    Json(body): Json<SeatBody>,
) -> ApiResult<Json<Data<Table>>> {
    let reservation_id = body.data.reservation_id.ok_or_else(|| {
        ApiError::Validation("A reservation_id is required to seat a table.".to_string())
    })?;

    let table = state.workflow.seat(table_id, reservation_id).await?;
    Ok(Json(Data { data: table }))
}

/// Finish the table, clearing its reservation
async fn finish_table(
    State(state): State<AppState>,
    Path(table_id): Path<i64>,
) -> ApiResult<Json<Data<Table>>> {
    let table = state.workflow.finish(table_id).await?;
    Ok(Json(Data { data: table }))
}

/// Hard-delete a table; occupied tables must be finished first
async fn delete_table(
    State(state): State<AppState>,
    Path(table_id): Path<i64>,
) -> ApiResult<Json<Data<Table>>> {
    let table = state
        .tables
        .read(table_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Table {table_id} does not exist.")))?;

    if table.occupied {
        return Err(ApiError::Validation("Table is occupied.".to_string()));
    }

    state.tables.delete(table_id).await?;
    Ok(Json(Data { data: table }))
}
