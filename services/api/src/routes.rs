use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use jobboard::board::applications::{application_router, ApplicationService};
use jobboard::board::{
    account_router, job_router, AccountService, BoardStore, EventPublisher, JobService,
};
use serde_json::json;
use std::sync::Arc;

/// Services backing the public API, sharing one store.
pub(crate) struct BoardServices<S, E> {
    pub(crate) accounts: Arc<AccountService<S>>,
    pub(crate) jobs: Arc<JobService<S>>,
    pub(crate) applications: Arc<ApplicationService<S, E>>,
}

impl<S, E> BoardServices<S, E>
where
    S: BoardStore + 'static,
    E: EventPublisher + 'static,
{
    pub(crate) fn new(store: Arc<S>, events: Arc<E>) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(store.clone())),
            jobs: Arc::new(JobService::new(store.clone())),
            applications: Arc::new(ApplicationService::new(store, events)),
        }
    }
}

pub(crate) fn with_board_routes<S, E>(services: BoardServices<S, E>) -> Router
where
    S: BoardStore + 'static,
    E: EventPublisher + 'static,
{
    application_router(services.applications)
        .merge(job_router(services.jobs))
        .merge(account_router(services.accounts))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
