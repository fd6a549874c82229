//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use messaging::MessagePublisher;
use serde::Serialize;
use transaction_store::TransactionStore;

use super::transactions::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `durable` or `degraded`.
    pub persistence: String,
}

/// GET /health: returns process health and the persistence mode.
pub async fn check<S, P>(State(state): State<Arc<AppState<S, P>>>) -> Json<HealthResponse>
where
    S: TransactionStore + 'static,
    P: MessagePublisher + 'static,
{
    Json(HealthResponse {
        status: "ok",
        persistence: state.persistence.to_string(),
    })
}
