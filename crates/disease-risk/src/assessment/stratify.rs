use serde::Serialize;

use super::domain::LocalizedText;

/// Ordered risk tier. Coarse tables use `Medium`; the fine table uses the moderate tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    LowModerate,
    Medium,
    Moderate,
    HighModerate,
    High,
}

impl RiskCategory {
    pub fn label(&self) -> LocalizedText {
        match self {
            RiskCategory::Low => LocalizedText::new("低风险", "Low Risk"),
            RiskCategory::LowModerate => LocalizedText::new("低中风险", "Low-Moderate Risk"),
            RiskCategory::Medium => LocalizedText::new("中等风险", "Medium Risk"),
            RiskCategory::Moderate => LocalizedText::new("中风险", "Moderate Risk"),
            RiskCategory::HighModerate => LocalizedText::new("中高风险", "High-Moderate Risk"),
            RiskCategory::High => LocalizedText::new("高风险", "High Risk"),
        }
    }

    /// Tiers that trigger escalation advice.
    pub fn is_high_tier(&self) -> bool {
        matches!(self, RiskCategory::HighModerate | RiskCategory::High)
    }

    /// Middle tiers of the fine table.
    pub fn is_moderate_tier(&self) -> bool {
        matches!(self, RiskCategory::LowModerate | RiskCategory::Moderate)
    }
}

/// Threshold table mapping a final score to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StratificationTable {
    /// `<30` low, `<70` medium, otherwise high.
    Coarse,
    /// `<20` low, `<40` low-moderate, `<60` moderate, `<80` high-moderate, otherwise high.
    Fine,
}

impl StratificationTable {
    fn thresholds(&self) -> &'static [(f64, RiskCategory)] {
        match self {
            StratificationTable::Coarse => {
                &[(30.0, RiskCategory::Low), (70.0, RiskCategory::Medium)]
            }
            StratificationTable::Fine => &[
                (20.0, RiskCategory::Low),
                (40.0, RiskCategory::LowModerate),
                (60.0, RiskCategory::Moderate),
                (80.0, RiskCategory::HighModerate),
            ],
        }
    }

    pub fn stratify(&self, score: f64) -> RiskCategory {
        self.thresholds()
            .iter()
            .find(|(upper, _)| score < *upper)
            .map(|(_, category)| *category)
            .unwrap_or(RiskCategory::High)
    }
}

/// Interval of ±10% around the score, clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

const INTERVAL_MARGIN: f64 = 0.10;

impl ConfidenceInterval {
    pub fn around(score: f64) -> Self {
        let margin = score * INTERVAL_MARGIN;
        Self {
            low: (score - margin).max(0.0),
            high: (score + margin).min(100.0),
        }
    }

    pub fn contains(&self, score: f64) -> bool {
        self.low <= score && score <= self.high
    }
}
