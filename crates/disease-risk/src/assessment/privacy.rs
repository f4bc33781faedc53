//! Laplace perturbation of normalized features.
//!
//! This is a differential-privacy flavored simulation: noise is drawn with a fixed scale per
//! level and no privacy budget is tracked. It provides no formal guarantee.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use super::domain::FeatureVector;

/// Three-level noise policy. Lower levels inject less noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    Low,
    Medium,
    High,
}

impl PrivacyLevel {
    /// Laplace scale parameter `b` for this level.
    pub fn noise_scale(&self) -> f64 {
        match self {
            PrivacyLevel::High => 0.01,
            PrivacyLevel::Medium => 0.005,
            PrivacyLevel::Low => 0.001,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Low => "low",
            PrivacyLevel::Medium => "medium",
            PrivacyLevel::High => "high",
        }
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown privacy level '{0}'")]
pub struct UnknownPrivacyLevel(pub String);

impl FromStr for PrivacyLevel {
    type Err = UnknownPrivacyLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(UnknownPrivacyLevel(value.to_string())),
        }
    }
}

/// Accepts the same spellings as `FromStr`.
impl<'de> Deserialize<'de> for PrivacyLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Zero-centred Laplace sample with scale `b`, via the inverse CDF of a uniform draw.
pub fn laplace_noise(scale: f64, rng: &mut impl Rng) -> f64 {
    let u: f64 = rng.gen_range(-0.5..0.5);
    let sign = if u >= 0.0 { 1.0 } else { -1.0 };
    let tail = (1.0 - 2.0 * u.abs()).max(f64::MIN_POSITIVE);
    -scale * sign * tail.ln()
}

/// Perturbs every feature with Laplace noise and clamps the result back into `[0, 1]`.
///
/// Features are visited in name order so a seeded source yields reproducible output.
pub fn apply_privacy_noise(
    features: &FeatureVector,
    level: PrivacyLevel,
    rng: &mut impl Rng,
) -> FeatureVector {
    let scale = level.noise_scale();
    features.map_values(|value| (value + laplace_noise(scale, rng)).clamp(0.0, 1.0))
}
