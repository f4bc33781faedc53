mod panda;
mod rules;
mod weights;

pub use panda::{logistic, reproductive_score};
pub use rules::smoking_index;
pub use weights::{FeatureWeight, ScoringWeights};

use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{FeatureVector, ValidatedFactors};
use super::stratify::StratificationTable;

/// Closed set of scoring strategies, selected per disease by its schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Table-driven points: age, pack-year index, family history, exposure, gender.
    LungCancer,
    /// Table-driven points: age, BMI, waist, systolic pressure, family history, activity.
    Diabetes,
    /// Continuous weights over `[0, 1]` features with privacy noise, federated adjustment and
    /// logistic normalization.
    Panda { weights: ScoringWeights },
    /// `(age - 20) * 0.5 + family_history * 20` for diseases without a dedicated strategy.
    Generic,
}

/// Identifier and version reported in result metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub version: &'static str,
}

/// Feature name to points attributed to it.
pub type Contributions = BTreeMap<&'static str, f64>;

impl ScoringStrategy {
    pub fn panda() -> Self {
        Self::Panda {
            weights: ScoringWeights::panda(),
        }
    }

    pub fn algorithm(&self) -> AlgorithmInfo {
        match self {
            ScoringStrategy::LungCancer => AlgorithmInfo {
                id: "lung_cancer_points",
                version: "1.0",
            },
            ScoringStrategy::Diabetes => AlgorithmInfo {
                id: "diabetes_points",
                version: "1.0",
            },
            ScoringStrategy::Panda { .. } => AlgorithmInfo {
                id: "panda",
                version: "1.0",
            },
            ScoringStrategy::Generic => AlgorithmInfo {
                id: "generic_linear",
                version: "1.0",
            },
        }
    }

    /// Whether features are normalized to `[0, 1]` and may receive privacy noise.
    pub fn supports_privacy_noise(&self) -> bool {
        matches!(self, ScoringStrategy::Panda { .. })
    }

    /// Whether the strategy ships a federated variant, which enables the adjustment by default.
    pub fn defines_federated_variant(&self) -> bool {
        matches!(self, ScoringStrategy::Panda { .. })
    }

    pub fn stratification(&self) -> StratificationTable {
        match self {
            ScoringStrategy::Panda { .. } => StratificationTable::Fine,
            _ => StratificationTable::Coarse,
        }
    }

    /// Feature names the strategy consumes.
    pub fn feature_names(&self) -> Vec<&'static str> {
        self.normalize(&ValidatedFactors::default())
            .names()
            .collect()
    }

    /// Factor ids the normalizer reads. Every schema using the strategy must declare them.
    pub fn required_factors(&self) -> &'static [&'static str] {
        match self {
            ScoringStrategy::LungCancer => &[
                "age",
                "gender",
                "smoking_years",
                "smoking_amount",
                "family_history",
                "occupational_exposure",
            ],
            ScoringStrategy::Diabetes => &[
                "age",
                "bmi",
                "waist_circumference",
                "systolic_bp",
                "family_history",
                "physical_activity",
            ],
            ScoringStrategy::Panda { .. } => &[
                "age",
                "family_history",
                "brca_mutation",
                "menstrual_age",
                "first_birth_age",
                "hormone_therapy",
                "breast_density",
            ],
            ScoringStrategy::Generic => &["age", "family_history"],
        }
    }

    pub fn normalize(&self, factors: &ValidatedFactors) -> FeatureVector {
        match self {
            ScoringStrategy::LungCancer => rules::lung_cancer_features(factors),
            ScoringStrategy::Diabetes => rules::diabetes_features(factors),
            ScoringStrategy::Panda { .. } => panda::features(factors),
            ScoringStrategy::Generic => rules::generic_features(factors),
        }
    }

    /// Raw score clamped to `[0, 100]`.
    pub fn base_score(&self, features: &FeatureVector) -> f64 {
        let raw = match self {
            ScoringStrategy::LungCancer | ScoringStrategy::Diabetes => {
                rules::points_total(features)
            }
            ScoringStrategy::Panda { weights } => panda::weighted_sum(weights, features),
            ScoringStrategy::Generic => {
                rules::generic_age_points(features) + rules::generic_family_points(features)
            }
        };

        raw.clamp(0.0, 100.0)
    }

    /// Maps the adjusted score to the final score. Only Panda squashes nonlinearly.
    pub fn finalize(&self, adjusted: f64) -> f64 {
        match self {
            ScoringStrategy::Panda { .. } => panda::logistic(adjusted),
            _ => adjusted.clamp(0.0, 100.0),
        }
    }

    /// Per-feature points. Weighted features lie in `[0, weight * 100]`; table-driven ones
    /// report their literal table value.
    pub fn contributions(&self, features: &FeatureVector) -> Contributions {
        match self {
            ScoringStrategy::LungCancer | ScoringStrategy::Diabetes => features.iter().collect(),
            ScoringStrategy::Panda { weights } => features
                .iter()
                .map(|(name, value)| (name, panda::weighted_contribution(weights, name, value)))
                .collect(),
            ScoringStrategy::Generic => Contributions::from([
                (
                    "age",
                    rules::generic_age_points(features).clamp(0.0, 40.0),
                ),
                ("family_history", rules::generic_family_points(features)),
            ]),
        }
    }

    /// Structural checks run when the catalog is built.
    pub(crate) fn check(&self) -> Result<(), String> {
        match self {
            ScoringStrategy::Panda { weights } => {
                weights.check()?;
                for feature in self.feature_names() {
                    if weights.weight(feature).is_none() {
                        return Err(format!("feature '{feature}' has no weight"));
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validated(entries: &[(&'static str, f64)]) -> ValidatedFactors {
        let mut factors = ValidatedFactors::default();
        for (id, value) in entries {
            factors.insert(id, *value);
        }
        factors
    }

    #[test]
    fn generic_score_is_clamped_at_zero() {
        let strategy = ScoringStrategy::Generic;
        let features = strategy.normalize(&validated(&[("age", 18.0), ("family_history", 0.0)]));
        assert_eq!(strategy.base_score(&features), 0.0);
    }

    #[test]
    fn generic_score_saturates_at_hundred() {
        let strategy = ScoringStrategy::Generic;
        let features = strategy.normalize(&validated(&[("age", 100.0), ("family_history", 1.0)]));
        assert_eq!(strategy.base_score(&features), 60.0);

        let features = strategy.normalize(&validated(&[("age", 250.0), ("family_history", 1.0)]));
        assert_eq!(strategy.base_score(&features), 100.0);
    }

    #[test]
    fn diabetes_negative_total_clamps_to_zero() {
        let strategy = ScoringStrategy::Diabetes;
        let features = strategy.normalize(&validated(&[("physical_activity", 2.0)]));
        assert_eq!(strategy.base_score(&features), 0.0);
        assert_eq!(strategy.contributions(&features)["physical_activity"], -5.0);
    }

    #[test]
    fn panda_contributions_are_bounded_by_weight() {
        let strategy = ScoringStrategy::panda();
        let features = strategy.normalize(&validated(&[
            ("age", 80.0),
            ("family_history", 1.0),
            ("brca_mutation", 1.0),
            ("menstrual_age", 11.0),
            ("first_birth_age", 32.0),
            ("hormone_therapy", 1.0),
            ("breast_density", 2.0),
        ]));
        let contributions = strategy.contributions(&features);

        assert_eq!(contributions.len(), 6);
        let ScoringStrategy::Panda { weights } = &strategy else {
            unreachable!("constructed as panda");
        };
        for (feature, points) in &contributions {
            let cap = weights.weight(feature).expect("weighted feature") * 100.0;
            assert!(
                *points >= 0.0 && *points <= cap + 1e-9,
                "{feature}: {points}"
            );
        }
    }

    #[test]
    fn feature_names_match_normalizer_output() {
        assert_eq!(
            ScoringStrategy::LungCancer.feature_names(),
            vec![
                "age",
                "family_history",
                "gender",
                "occupational_exposure",
                "smoking",
            ]
        );
        assert_eq!(ScoringStrategy::panda().feature_names().len(), 6);
    }

    #[test]
    fn standard_schemas_declare_every_required_factor() {
        for schema in crate::assessment::catalog::standard_schemas() {
            for id in schema.strategy.required_factors() {
                assert!(schema.factor(id).is_some(), "{}: {id}", schema.id);
            }
        }
    }

    #[test]
    fn required_factors_cover_the_dedicated_inputs() {
        let lung = ScoringStrategy::LungCancer.required_factors();
        assert!(lung.contains(&"smoking_amount"));
        let panda = ScoringStrategy::panda();
        assert!(panda.required_factors().contains(&"breast_density"));
        assert_eq!(
            ScoringStrategy::Generic.required_factors(),
            ["age", "family_history"]
        );
    }

    #[test]
    fn only_panda_uses_the_fine_table() {
        assert_eq!(
            ScoringStrategy::panda().stratification(),
            StratificationTable::Fine
        );
        assert_eq!(
            ScoringStrategy::Diabetes.stratification(),
            StratificationTable::Coarse
        );
    }

    #[test]
    fn check_rejects_unweighted_panda_features() {
        let strategy = ScoringStrategy::Panda {
            weights: ScoringWeights::new([("age_score", 0.25)]),
        };
        assert!(strategy.check().is_err());
        assert!(ScoringStrategy::panda().check().is_ok());
    }
}
