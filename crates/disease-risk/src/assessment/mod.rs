//! Disease risk scoring pipeline.
//!
//! Raw factors flow through validation, per-disease normalization, optional Laplace noise, the
//! base scorer, an optional federated consensus adjustment and final normalization, then fan
//! out into a category, a confidence interval, per-feature contributions and recommendations.
//!
//! The privacy and federated stages are simulations built from random draws. They carry no
//! cryptographic or formal differential-privacy guarantee.

pub mod catalog;
pub mod domain;
mod engine;
mod error;
pub mod federated;
pub mod privacy;
pub mod recommendations;
pub mod router;
pub mod scoring;
pub mod stratify;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CategoryListing, DiseaseCatalog, DiseaseSummary};
pub use domain::{
    DiseaseCategory, DiseaseSchema, FactorKind, FactorSet, FactorSpec, FactorValue, FeatureVector,
    LocalizedText, SelectOption, ValidatedFactors,
};
pub use engine::{EngineSettings, ResultMetadata, RiskEngine, RiskResult, ScoreOptions};
pub use error::AssessmentError;
pub use federated::FederatedAdjustment;
pub use privacy::{PrivacyLevel, UnknownPrivacyLevel};
pub use recommendations::{Recommendation, RecommendationKey};
pub use router::{risk_router, CatalogResponse, PredictRequest};
pub use scoring::{AlgorithmInfo, Contributions, ScoringStrategy, ScoringWeights};
pub use stratify::{ConfidenceInterval, RiskCategory, StratificationTable};
pub use validation::validate_factors;
