use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::CategoryListing;
use super::domain::{DiseaseSchema, FactorSet};
use super::engine::{RiskEngine, RiskResult, ScoreOptions};
use super::error::AssessmentError;
use crate::error::AppError;

/// Body accepted by the prediction endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub factors: FactorSet,
    pub options: ScoreOptions,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub categories: Vec<CategoryListing>,
    pub status: &'static str,
}

/// Router exposing scoring and schema lookup over JSON.
pub fn risk_router(engine: Arc<RiskEngine>) -> Router {
    Router::new()
        .route("/api/predict/:disease_id", post(predict_handler))
        .route("/api/diseases", get(catalog_handler))
        .route("/api/diseases/:disease_id", get(schema_handler))
        .with_state(engine)
}

pub(crate) async fn predict_handler(
    State(engine): State<Arc<RiskEngine>>,
    Path(disease_id): Path<String>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<RiskResult>, AppError> {
    engine.schema(&disease_id)?;

    let Json(request) = payload.map_err(|rejection| {
        warn!(disease = %disease_id, %rejection, "rejected prediction payload");
        AssessmentError::Validation(format!("invalid request data: {rejection}"))
    })?;

    let result = engine
        .score(&disease_id, &request.factors, &request.options)
        .map_err(|error| {
            warn!(disease = %disease_id, %error, "prediction failed");
            error
        })?;

    Ok(Json(result))
}

pub(crate) async fn catalog_handler(
    State(engine): State<Arc<RiskEngine>>,
) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        categories: engine.catalog().listing(),
        status: "success",
    })
}

pub(crate) async fn schema_handler(
    State(engine): State<Arc<RiskEngine>>,
    Path(disease_id): Path<String>,
) -> Result<Json<DiseaseSchema>, AppError> {
    let schema = engine.schema(&disease_id)?;
    Ok(Json(schema.clone()))
}
