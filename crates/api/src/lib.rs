//! HTTP API server with observability for the transaction service.
//!
//! Provides REST endpoints for recording and reading transactions,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::TransactionService;
use messaging::MessagePublisher;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use transaction_store::{DurableStore, PersistenceBackend, TransactionStore};

use routes::transactions::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, P>(state: Arc<AppState<S, P>>, metrics_handle: PrometheusHandle) -> Router
where
    S: TransactionStore + 'static,
    P: MessagePublisher + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S, P>))
        .route(
            "/transactions",
            get(routes::transactions::list::<S, P>).post(routes::transactions::create::<S, P>),
        )
        .route("/transactions/{id}", get(routes::transactions::get::<S, P>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over a persistence backend.
pub fn create_state<D, P>(
    backend: PersistenceBackend<D>,
    publisher: P,
) -> Arc<AppState<PersistenceBackend<D>, P>>
where
    D: DurableStore,
    P: MessagePublisher,
{
    let persistence = backend.mode();
    Arc::new(AppState::new(
        TransactionService::new(backend, publisher),
        persistence,
    ))
}
