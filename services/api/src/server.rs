use crate::cli::ServeArgs;
use crate::infra::{AppState, TracingEventPublisher};
use crate::routes::{with_board_routes, BoardServices};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobboard::board::InMemoryBoardStore;
use jobboard::config::AppConfig;
use jobboard::error::AppError;
use jobboard::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryBoardStore::new(config.store));
    let events = Arc::new(TracingEventPublisher);
    let services = BoardServices::new(store, events);

    let app = with_board_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        store_timeout_ms = config.store.operation_timeout.as_millis() as u64,
        "job board ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
