//! # REST API HTTP Server
//!
//! Axum routes for the cafe endpoints. All parameters are read from the
//! query string, for POST as well as GET. When a key repeats, its first
//! value is used.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
    Json, Router,
};
use serde::Serialize;

use crate::store::CafeStore;

use super::errors::{ApiResult, ErrorMode};
use super::handler::CafeHandler;
use super::response::HealthResponse;

/// REST API server state
pub struct CafeServer<S: CafeStore> {
    handler: CafeHandler<S>,
    error_mode: ErrorMode,
}

impl<S: CafeStore + 'static> CafeServer<S> {
    pub fn new(handler: CafeHandler<S>, error_mode: ErrorMode) -> Self {
        Self {
            handler,
            error_mode,
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/health", get(health_handler))
            .route("/random/", get(random_handler::<S>))
            .route("/random", get(random_handler::<S>))
            .route("/all", get(all_handler::<S>))
            .route("/search", get(search_handler::<S>))
            .route("/add", get(add_handler::<S>).post(add_handler::<S>))
            .route("/update-price/:id", patch(update_price_handler::<S>))
            .route("/report-closed/:id", delete(delete_handler::<S>))
            .with_state(state)
    }

    fn reply<T: Serialize>(&self, result: ApiResult<T>) -> Response {
        match result {
            Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            Err(err) => {
                if err.status_code().is_server_error() {
                    tracing::error!(error = %err, "request failed");
                }
                err.into_response_with(self.error_mode)
            }
        }
    }
}

/// Shared state type
type ServerState<S> = Arc<CafeServer<S>>;

/// Raw query pairs in request order
type Params = Query<Vec<(String, String)>>;

/// Collapse query pairs into a map, keeping the first value of each key
fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        map.entry(key).or_insert(value);
    }
    map
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn random_handler<S: CafeStore + 'static>(State(server): State<ServerState<S>>) -> Response {
    server.reply(server.handler.random_cafe())
}

async fn all_handler<S: CafeStore + 'static>(State(server): State<ServerState<S>>) -> Response {
    server.reply(server.handler.all_cafes())
}

async fn search_handler<S: CafeStore + 'static>(
    State(server): State<ServerState<S>>,
    Query(query): Params,
) -> Response {
    let query = first_values(query);
    let location = query.get("loc").map(String::as_str);
    server.reply(server.handler.search_by_location(location))
}

async fn add_handler<S: CafeStore + 'static>(
    State(server): State<ServerState<S>>,
    Query(query): Params,
) -> Response {
    server.reply(server.handler.add_cafe(&first_values(query)))
}

async fn update_price_handler<S: CafeStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(id): Path<String>,
    Query(query): Params,
) -> Response {
    let new_price = first_values(query).remove("new_price");
    server.reply(server.handler.update_price(&id, new_price))
}

async fn delete_handler<S: CafeStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(id): Path<String>,
    Query(query): Params,
) -> Response {
    let query = first_values(query);
    let key = query.get("api-key").map(String::as_str);
    server.reply(server.handler.delete_cafe(&id, key))
}
