use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use disease_risk::assessment::{risk_router, RiskEngine};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_risk_routes(engine: Arc<RiskEngine>) -> axum::Router {
    risk_router(engine)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use disease_risk::assessment::EngineSettings;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let engine = RiskEngine::standard(EngineSettings::default()).expect("standard catalog");
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_risk_routes(Arc::new(engine)).layer(Extension(state))
    }

    async fn get(app: axum::Router, uri: &str) -> StatusCode {
        let request = Request::get(uri)
            .body(Body::empty())
            .expect("request builds");
        let response = app.oneshot(request).await.expect("route executes");
        response.status()
    }

    #[tokio::test]
    async fn operational_routes_respond() {
        assert_eq!(get(app(true), "/health").await, StatusCode::OK);
        assert_eq!(get(app(true), "/ready").await, StatusCode::OK);
        assert_eq!(get(app(true), "/metrics").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        assert_eq!(
            get(app(false), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn risk_routes_are_mounted() {
        assert_eq!(get(app(true), "/api/diseases").await, StatusCode::OK);
        assert_eq!(get(app(true), "/api/diseases/copd").await, StatusCode::OK);
        assert_eq!(
            get(app(true), "/api/diseases/flu").await,
            StatusCode::NOT_FOUND
        );
    }
}
