//! Panda v1.0 breast-cancer features and logistic normalization.

use super::super::domain::{FeatureVector, ValidatedFactors};
use super::weights::ScoringWeights;

const REPRODUCTIVE_CAP: f64 = 1.0;
const LOGISTIC_STEEPNESS: f64 = 0.1;
const LOGISTIC_MIDPOINT: f64 = 50.0;

pub(crate) fn features(factors: &ValidatedFactors) -> FeatureVector {
    let age_score = ((factors.get("age") - 20.0) / 60.0).clamp(0.0, 1.0);
    let brca_score = if factors.is("brca_mutation", 1) {
        0.8
    } else if factors.is("brca_mutation", 2) {
        0.7
    } else {
        0.0
    };

    FeatureVector::default()
        .with("age_score", age_score)
        .with("family_history", factors.get("family_history"))
        .with("brca_score", brca_score)
        .with(
            "reproductive_score",
            reproductive_score(factors.get("menstrual_age"), factors.get("first_birth_age")),
        )
        .with("hormone_therapy", factors.get("hormone_therapy"))
        .with("breast_density_score", factors.get("breast_density") / 2.0)
}

/// Early menarche plus late first birth, capped at one.
pub fn reproductive_score(menstrual_age: f64, first_birth_age: f64) -> f64 {
    let menarche = if menstrual_age < 12.0 {
        0.3
    } else if menstrual_age < 14.0 {
        0.1
    } else {
        0.0
    };
    let first_birth = if first_birth_age > 30.0 {
        0.2
    } else if first_birth_age > 25.0 {
        0.1
    } else {
        0.0
    };

    f64::min(menarche + first_birth, REPRODUCTIVE_CAP)
}

pub(crate) fn weighted_contribution(weights: &ScoringWeights, feature: &str, value: f64) -> f64 {
    value * weights.weight(feature).unwrap_or(0.0) * 100.0
}

pub(crate) fn weighted_sum(weights: &ScoringWeights, features: &FeatureVector) -> f64 {
    features
        .iter()
        .map(|(name, value)| weighted_contribution(weights, name, value))
        .sum::<f64>()
}

/// Logistic squashing of the adjusted score into `(0, 100)`.
pub fn logistic(adjusted: f64) -> f64 {
    100.0 / (1.0 + (-LOGISTIC_STEEPNESS * (adjusted - LOGISTIC_MIDPOINT)).exp())
}
