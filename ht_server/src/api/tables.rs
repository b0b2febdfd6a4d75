//! Table API handlers.
//!
//! This module provides HTTP endpoints for table operations including:
//! - Listing tables with player counts and stakes
//! - Getting a table snapshot as a given player sees it
//! - Sitting down and standing up
//! - Starting hands and taking actions (fold, check, call, raise, all-in)
//!
//! # Examples
//!
//! Sit down in seat 3:
//! ```bash
//! curl -X POST http://localhost:6969/api/v1/tables/1/seats/3 \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "alice"}'
//! ```

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use holdem_table::{
    entities::{Action, ActionOutcome, ConnectionId, Money, SeatId, TableId, TableView},
    table::{TableHandle, TableResponse},
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::logging::log_table_command;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize)]
pub struct TableListItem {
    pub id: TableId,
    pub name: String,
    pub max_players: usize,
    pub player_count: usize,
    pub limit: Money,
    pub hand_in_progress: bool,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub connection_id: Option<ConnectionId>,
}

#[derive(Debug, Deserialize)]
pub struct SitRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SitResponse {
    pub connection_id: ConnectionId,
}

#[derive(Debug, Deserialize)]
pub struct StandRequest {
    pub connection_id: ConnectionId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StandResponse {
    pub stack: Money,
}

#[derive(Debug, Deserialize)]
pub struct TakeActionRequest {
    pub connection_id: ConnectionId,
    pub action: ActionPayload,
}

/// `{"type": "Raise", "amount": 40}` raises to a total bet of 40 cents.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "amount")]
pub enum ActionPayload {
    Fold,
    Check,
    Call,
    Raise(Money),
    AllIn,
}

impl ActionPayload {
    fn into_parts(self) -> (Action, Option<Money>) {
        match self {
            ActionPayload::Fold => (Action::Fold, None),
            ActionPayload::Check => (Action::Check, None),
            ActionPayload::Call => (Action::Call, None),
            ActionPayload::Raise(amount) => (Action::Raise, Some(amount)),
            ActionPayload::AllIn => (Action::AllIn, None),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

fn find_table(state: &AppState, table_id: TableId) -> Result<&TableHandle, ApiError> {
    state
        .tables
        .get(&table_id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Table not found"))
}

fn closed(table_id: TableId) -> ApiError {
    api_error(
        StatusCode::SERVICE_UNAVAILABLE,
        format!("Table {table_id} is closed"),
    )
}

/// Map a failed table response onto an HTTP error.
fn rejection(response: TableResponse) -> ApiError {
    let status = match response {
        TableResponse::NotAtTable => StatusCode::NOT_FOUND,
        TableResponse::NotYourTurn | TableResponse::SeatTaken => StatusCode::CONFLICT,
        TableResponse::InvalidAction(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = response
        .error_message()
        .unwrap_or_else(|| "Unexpected table response".to_string());
    api_error(status, message)
}

/// List all tables.
///
/// # Response
///
/// Returns `200 OK` with array of table summaries:
/// ```json
/// [{"id": 1, "name": "Table 1", "max_players": 6, "player_count": 2, "limit": 200, "hand_in_progress": false}]
/// ```
pub async fn list_tables(State(state): State<AppState>) -> Json<Vec<TableListItem>> {
    let mut items = Vec::with_capacity(state.tables.len());
    for handle in state.tables.values() {
        // Closed tables drop out of the listing.
        if let Ok(view) = handle.view(None).await {
            items.push(TableListItem {
                id: view.id,
                name: view.name,
                max_players: view.max_players,
                player_count: view.seats.iter().flatten().count(),
                limit: view.limit,
                hand_in_progress: view.hand_in_progress,
            });
        }
    }
    Json(items)
}

/// Get a snapshot of a table.
///
/// Hole cards are only included for the seat owned by `connection_id`,
/// and for every hand still live after a showdown.
///
/// # Errors
///
/// - `404 Not Found`: Table doesn't exist
pub async fn get_table(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<TableView>, ApiError> {
    let handle = find_table(&state, table_id)?;
    handle
        .view(query.connection_id)
        .await
        .map(Json)
        .map_err(|_| closed(table_id))
}

/// Sit down in a seat.
///
/// # Response
///
/// Returns `200 OK` with the connection id to act through:
/// ```json
/// {"connection_id": "6f1c..."}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Empty name or seat number out of range
/// - `409 Conflict`: Seat is taken
pub async fn sit_player(
    State(state): State<AppState>,
    Path((table_id, seat_id)): Path<(TableId, SeatId)>,
    Json(request): Json<SitRequest>,
) -> Result<Json<SitResponse>, ApiError> {
    let handle = find_table(&state, table_id)?;
    let response = handle
        .sit(&request.name, seat_id)
        .await
        .map_err(|_| closed(table_id))?;
    match response {
        TableResponse::Seated(connection_id) => {
            log_table_command(table_id, "sit", "seated");
            Ok(Json(SitResponse { connection_id }))
        }
        other => Err(rejection(other)),
    }
}

/// Stand up and leave with the remaining stack.
///
/// # Errors
///
/// - `404 Not Found`: Table doesn't exist or the connection isn't seated
pub async fn stand_player(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(request): Json<StandRequest>,
) -> Result<Json<StandResponse>, ApiError> {
    let handle = find_table(&state, table_id)?;
    let response = handle
        .stand(request.connection_id)
        .await
        .map_err(|_| closed(table_id))?;
    match response {
        TableResponse::Stood(stack) => {
            log_table_command(table_id, "stand", "stood");
            Ok(Json(StandResponse { stack }))
        }
        other => Err(rejection(other)),
    }
}

/// Deal a new hand.
///
/// # Errors
///
/// - `400 Bad Request`: A hand is in progress or fewer than two players have chips
pub async fn start_hand(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
) -> Result<StatusCode, ApiError> {
    let handle = find_table(&state, table_id)?;
    let response = handle.start_hand().await.map_err(|_| closed(table_id))?;
    match response {
        TableResponse::Success => {
            log_table_command(table_id, "start", "dealt");
            Ok(StatusCode::OK)
        }
        other => Err(rejection(other)),
    }
}

/// Take an action (fold, check, call, raise, all-in).
///
/// # Request Body
///
/// ```json
/// {"connection_id": "6f1c...", "action": {"type": "Raise", "amount": 40}}
/// ```
///
/// # Response
///
/// Returns `200 OK` with the seat and its action message:
/// ```json
/// {"seat_id": 3, "message": "alice raises to $0.40"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid action
/// - `404 Not Found`: Table doesn't exist or the connection isn't seated
/// - `409 Conflict`: Not your turn
pub async fn take_action(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(request): Json<TakeActionRequest>,
) -> Result<Json<ActionOutcome>, ApiError> {
    let handle = find_table(&state, table_id)?;
    let (action, amount) = request.action.into_parts();
    let response = handle
        .act(request.connection_id, action, amount)
        .await
        .map_err(|_| closed(table_id))?;
    match response {
        TableResponse::Acted(outcome) => {
            log_table_command(table_id, "action", &outcome.message);
            Ok(Json(outcome))
        }
        other => Err(rejection(other)),
    }
}
