use disease_risk::assessment::RiskEngine;
use disease_risk::config::AppConfig;
use disease_risk::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the shared engine from the configured process-wide scoring defaults.
pub(crate) fn shared_engine(config: &AppConfig) -> Result<Arc<RiskEngine>, AppError> {
    Ok(Arc::new(RiskEngine::standard(config.engine)?))
}
