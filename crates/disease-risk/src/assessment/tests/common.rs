use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::FactorSet;
use crate::assessment::engine::{EngineSettings, RiskEngine};
use crate::assessment::risk_router;

pub(super) fn engine() -> RiskEngine {
    RiskEngine::standard(EngineSettings::default()).expect("standard catalog builds")
}

pub(super) fn router() -> axum::Router {
    risk_router(Arc::new(engine()))
}

pub(super) fn factors(entries: &[(&str, f64)]) -> FactorSet {
    entries.iter().map(|(id, value)| (*id, *value)).collect()
}

pub(super) fn low_risk_diabetes() -> FactorSet {
    factors(&[
        ("age", 25.0),
        ("bmi", 22.0),
        ("waist_circumference", 75.0),
        ("systolic_bp", 110.0),
        ("family_history", 0.0),
        ("physical_activity", 2.0),
    ])
}

pub(super) fn high_risk_diabetes() -> FactorSet {
    factors(&[
        ("age", 65.0),
        ("bmi", 32.0),
        ("waist_circumference", 100.0),
        ("systolic_bp", 150.0),
        ("family_history", 1.0),
        ("physical_activity", 0.0),
    ])
}

pub(super) fn heavy_smoker() -> FactorSet {
    factors(&[
        ("age", 60.0),
        ("gender", 1.0),
        ("smoking_years", 30.0),
        ("smoking_amount", 20.0),
        ("family_history", 1.0),
        ("occupational_exposure", 1.0),
    ])
}

pub(super) fn breast_cancer_patient() -> FactorSet {
    factors(&[
        ("age", 45.0),
        ("family_history", 1.0),
        ("brca_mutation", 0.0),
        ("menstrual_age", 12.0),
        ("first_birth_age", 28.0),
        ("hormone_therapy", 0.0),
        ("breast_density", 2.0),
    ])
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("response is JSON")
}
