use jobboard::board::applications::ApplicationEvent;
use jobboard::board::{EventPublisher, PublishError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Publishes lifecycle events to the log stream until a mail relay is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct TracingEventPublisher;

impl EventPublisher for TracingEventPublisher {
    fn publish(&self, event: ApplicationEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_string(&event)
            .map_err(|err| PublishError::Transport(err.to_string()))?;
        info!(
            template = event.template(),
            application_id = %event.application_id().0,
            %payload,
            "application event published"
        );
        Ok(())
    }
}
