use serde::Serialize;

/// Weight applied to one normalized feature by a continuous-weight strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureWeight {
    pub feature: &'static str,
    pub weight: f64,
}

/// Immutable feature weights of a continuous-weight strategy. Sums need not equal one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoringWeights(Vec<FeatureWeight>);

impl ScoringWeights {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, f64)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(feature, weight)| FeatureWeight { feature, weight })
                .collect(),
        )
    }

    /// Panda v1.0 breast-cancer weights.
    pub fn panda() -> Self {
        Self::new([
            ("age_score", 0.25),
            ("family_history", 0.30),
            ("brca_score", 0.35),
            ("reproductive_score", 0.15),
            ("hormone_therapy", 0.10),
            ("breast_density_score", 0.20),
        ])
    }

    pub fn weight(&self, feature: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|entry| entry.feature == feature)
            .map(|entry| entry.weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureWeight> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every weight must be finite, in `[0, 1]`, and name a distinct feature.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.0.is_empty() {
            return Err("weight table is empty".to_string());
        }
        for (index, entry) in self.0.iter().enumerate() {
            if !entry.weight.is_finite() || !(0.0..=1.0).contains(&entry.weight) {
                return Err(format!(
                    "weight {} for feature '{}' outside [0, 1]",
                    entry.weight, entry.feature
                ));
            }
            if self.0[..index]
                .iter()
                .any(|other| other.feature == entry.feature)
            {
                return Err(format!("feature '{}' weighted twice", entry.feature));
            }
        }
        Ok(())
    }
}
