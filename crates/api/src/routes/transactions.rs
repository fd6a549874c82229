//! Transaction endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use domain::{CreateTransaction, TransactionId, TransactionService, TransactionView};
use messaging::MessagePublisher;
use transaction_store::{BackendMode, TransactionStore};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: TransactionStore, P: MessagePublisher> {
    pub service: TransactionService<S, P>,
    /// Persistence mode chosen at startup, reported by `/health`.
    pub persistence: BackendMode,
}

impl<S: TransactionStore, P: MessagePublisher> AppState<S, P> {
    pub fn new(service: TransactionService<S, P>, persistence: BackendMode) -> Self {
        Self {
            service,
            persistence,
        }
    }
}

/// GET /transactions: list every stored transaction.
#[tracing::instrument(skip(state))]
pub async fn list<S, P>(
    State(state): State<Arc<AppState<S, P>>>,
) -> Result<Json<Vec<TransactionView>>, ApiError>
where
    S: TransactionStore + 'static,
    P: MessagePublisher + 'static,
{
    let transactions = state.service.list_transactions().await?;
    Ok(Json(transactions))
}

/// GET /transactions/{id}: load a single transaction.
#[tracing::instrument(skip(state))]
pub async fn get<S, P>(
    State(state): State<Arc<AppState<S, P>>>,
    Path(id): Path<String>,
) -> Result<Json<TransactionView>, ApiError>
where
    S: TransactionStore + 'static,
    P: MessagePublisher + 'static,
{
    let transaction = state
        .service
        .get_transaction(&TransactionId::from(id.as_str()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Transaction with ID {id} not found")))?;

    Ok(Json(transaction))
}

/// POST /transactions: record a new transaction.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S, P>(
    State(state): State<Arc<AppState<S, P>>>,
    payload: Result<Json<CreateTransaction>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: TransactionStore + 'static,
    P: MessagePublisher + 'static,
{
    let Json(request) = payload?;
    let created = state.service.create_transaction(request).await?;
    let location = format!("/transactions/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}
