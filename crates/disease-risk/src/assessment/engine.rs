use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::DiseaseCatalog;
use super::domain::{DiseaseSchema, FactorSet, LocalizedText};
use super::error::AssessmentError;
use super::federated::FederatedAdjustment;
use super::privacy::{apply_privacy_noise, PrivacyLevel};
use super::recommendations::{recommendations, Recommendation};
use super::scoring::Contributions;
use super::stratify::{ConfidenceInterval, RiskCategory};
use super::validation::validate_factors;

/// Process-wide defaults applied to strategies that define privacy and federated variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub privacy_level: PrivacyLevel,
    pub federated_mode: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            privacy_level: PrivacyLevel::High,
            federated_mode: true,
        }
    }
}

/// Per-call overrides. Unset fields take the disease's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreOptions {
    pub privacy_level: Option<PrivacyLevel>,
    /// Disables or enables Laplace noise where the strategy supports it.
    pub privacy_noise: Option<bool>,
    pub federated_mode: Option<bool>,
    /// Makes every randomized stage reproducible.
    pub random_seed: Option<u64>,
}

impl ScoreOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            random_seed: Some(seed),
            ..Self::default()
        }
    }

    /// No privacy noise and no federated adjustment: a fully deterministic run.
    pub fn deterministic() -> Self {
        Self {
            privacy_noise: Some(false),
            federated_mode: Some(false),
            ..Self::default()
        }
    }
}

/// Provenance recorded with every result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultMetadata {
    pub algorithm: &'static str,
    pub algorithm_version: &'static str,
    pub privacy_level: Option<PrivacyLevel>,
    pub privacy_noise: bool,
    pub federated_mode: bool,
    pub generated_at: DateTime<Utc>,
}

/// Outcome of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskResult {
    pub disease_id: &'static str,
    pub score: f64,
    pub category: RiskCategory,
    pub category_label: LocalizedText,
    pub confidence_interval: ConfidenceInterval,
    pub contributions: Contributions,
    pub recommendations: Vec<Recommendation>,
    pub metadata: ResultMetadata,
}

/// Stage toggles resolved from the options, the strategy and the engine settings.
struct ResolvedOptions {
    privacy_level: Option<PrivacyLevel>,
    privacy_noise: bool,
    federated_mode: bool,
}

/// Stateless scoring engine over an immutable disease catalog.
///
/// Holds no random state: every call draws from its own source, so a shared `Arc<RiskEngine>` can
/// serve concurrent requests without coordination.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    catalog: DiseaseCatalog,
    settings: EngineSettings,
}

impl RiskEngine {
    pub fn new(catalog: DiseaseCatalog, settings: EngineSettings) -> Self {
        Self { catalog, settings }
    }

    /// Engine over the standard catalog.
    pub fn standard(settings: EngineSettings) -> Result<Self, AssessmentError> {
        Ok(Self::new(DiseaseCatalog::standard()?, settings))
    }

    pub fn catalog(&self) -> &DiseaseCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn schema(&self, disease_id: &str) -> Result<&DiseaseSchema, AssessmentError> {
        self.catalog
            .get(disease_id)
            .ok_or_else(|| AssessmentError::not_found(disease_id))
    }

    /// Scores with a generator seeded from `options.random_seed`, or from OS entropy.
    pub fn score(
        &self,
        disease_id: &str,
        factors: &FactorSet,
        options: &ScoreOptions,
    ) -> Result<RiskResult, AssessmentError> {
        let mut rng = match options.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.score_with_rng(disease_id, factors, options, &mut rng)
    }

    /// Scores drawing all noise from `rng`: privacy noise first, then the federated factors.
    pub fn score_with_rng<R: Rng>(
        &self,
        disease_id: &str,
        factors: &FactorSet,
        options: &ScoreOptions,
        rng: &mut R,
    ) -> Result<RiskResult, AssessmentError> {
        let schema = self.schema(disease_id)?;
        let strategy = &schema.strategy;
        let resolved = self.resolve(schema, options);

        let validated = validate_factors(schema, factors)?;
        let features = strategy.normalize(&validated);
        let features = match (resolved.privacy_noise, resolved.privacy_level) {
            (true, Some(level)) => apply_privacy_noise(&features, level, &mut *rng),
            _ => features,
        };

        let raw_score = strategy.base_score(&features);
        let adjusted = if resolved.federated_mode {
            FederatedAdjustment::draw(&mut *rng).apply(raw_score)
        } else {
            raw_score
        };
        let score = strategy.finalize(adjusted);
        if !score.is_finite() {
            return Err(AssessmentError::Computation(format!(
                "non-finite score for '{disease_id}'"
            )));
        }

        let category = strategy.stratification().stratify(score);
        let algorithm = strategy.algorithm();

        info!(
            disease = schema.id,
            algorithm = algorithm.id,
            score,
            ?category,
            federated = resolved.federated_mode,
            "risk assessment completed"
        );

        Ok(RiskResult {
            disease_id: schema.id,
            score,
            category,
            category_label: category.label(),
            confidence_interval: ConfidenceInterval::around(score),
            contributions: strategy.contributions(&features),
            recommendations: recommendations(strategy, category, &validated),
            metadata: ResultMetadata {
                algorithm: algorithm.id,
                algorithm_version: algorithm.version,
                privacy_level: resolved.privacy_level,
                privacy_noise: resolved.privacy_noise,
                federated_mode: resolved.federated_mode,
                generated_at: Utc::now(),
            },
        })
    }

    fn resolve(&self, schema: &DiseaseSchema, options: &ScoreOptions) -> ResolvedOptions {
        let strategy = &schema.strategy;

        let privacy_level = strategy
            .supports_privacy_noise()
            .then(|| options.privacy_level.unwrap_or(self.settings.privacy_level));
        let privacy_noise = privacy_level.is_some() && options.privacy_noise.unwrap_or(true);
        let default_federated =
            strategy.defines_federated_variant() && self.settings.federated_mode;
        let federated_mode = options.federated_mode.unwrap_or(default_federated);

        ResolvedOptions {
            privacy_level,
            privacy_noise,
            federated_mode,
        }
    }
}
