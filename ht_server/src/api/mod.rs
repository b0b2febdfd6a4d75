//! HTTP API for the table server.
//!
//! Every table command is forwarded to that table's actor, so requests
//! against one table are applied one at a time while different tables run
//! in parallel.
//!
//! # Endpoints Overview
//!
//! - `GET /health` - Server health status
//! - `GET /api/v1/tables` - List tables
//! - `GET /api/v1/tables/{table_id}?connection_id=<id>` - Table snapshot
//! - `POST /api/v1/tables/{table_id}/seats/{seat_id}` - Sit down
//! - `POST /api/v1/tables/{table_id}/stand` - Stand up
//! - `POST /api/v1/tables/{table_id}/start` - Deal a new hand
//! - `POST /api/v1/tables/{table_id}/action` - Fold, check, call, raise or all-in
//!
//! Money amounts in requests and responses are integer cents.
//!
//! # CORS
//!
//! CORS is configured permissively for development.

pub mod tables;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use holdem_table::{entities::TableId, table::TableHandle};
use serde_json::json;
use std::{collections::BTreeMap, sync::Arc};
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the table map is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub tables: Arc<BTreeMap<TableId, TableHandle>>,
}

impl AppState {
    pub fn new(handles: impl IntoIterator<Item = TableHandle>) -> Self {
        let tables = handles
            .into_iter()
            .map(|handle| (handle.table_id(), handle))
            .collect();
        Self {
            tables: Arc::new(tables),
        }
    }
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", create_v1_router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/tables", get(tables::list_tables))
        .route("/tables/{table_id}", get(tables::get_table))
        .route(
            "/tables/{table_id}/seats/{seat_id}",
            post(tables::sit_player),
        )
        .route("/tables/{table_id}/stand", post(tables::stand_player))
        .route("/tables/{table_id}/start", post(tables::start_hand))
        .route("/tables/{table_id}/action", post(tables::take_action))
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` while at least one table actor still answers, or
/// `503 Service Unavailable` otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut active_count = 0;
    for handle in state.tables.values() {
        if handle.view(None).await.is_ok() {
            active_count += 1;
        }
    }
    let healthy = active_count > 0;

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "tables": {
            "configured": state.tables.len(),
            "active_count": active_count,
        },
    });

    (status_code, Json(response))
}
