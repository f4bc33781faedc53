//! Simulated federated consensus adjustment.
//!
//! No nodes are contacted and no model is aggregated: the consensus and population factors are
//! random draws standing in for multi-site calibration.

use rand::Rng;
use serde::Serialize;

const CONSENSUS_MEAN: f64 = 1.0;
const CONSENSUS_STD_DEV: f64 = 0.05;
const POPULATION_MIN: f64 = 0.95;
const POPULATION_MAX: f64 = 1.05;

/// Multiplicative factors drawn for one adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FederatedAdjustment {
    pub consensus_factor: f64,
    pub population_factor: f64,
}

impl FederatedAdjustment {
    /// Draws the consensus factor first, then the population factor.
    pub fn draw(rng: &mut impl Rng) -> Self {
        let consensus_factor = CONSENSUS_MEAN + CONSENSUS_STD_DEV * standard_normal(rng);
        let population_factor = rng.gen_range(POPULATION_MIN..=POPULATION_MAX);
        Self {
            consensus_factor,
            population_factor,
        }
    }

    pub fn apply(&self, raw_score: f64) -> f64 {
        (raw_score * self.consensus_factor * self.population_factor).clamp(0.0, 100.0)
    }
}

/// Standard normal sample via Box-Muller.
pub(crate) fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let radius = (-2.0 * u1.ln()).sqrt();
    radius * (2.0 * std::f64::consts::PI * u2).cos()
}
