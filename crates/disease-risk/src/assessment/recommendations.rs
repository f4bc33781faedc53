use serde::Serialize;

use super::domain::{LocalizedText, ValidatedFactors};
use super::scoring::ScoringStrategy;
use super::stratify::RiskCategory;

/// Advice selected by the rule table. Text lives with the key, not in the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKey {
    QuitSmoking,
    AnnualChestCt,
    AvoidSecondhandSmoke,
    WeightControl,
    IncreaseActivity,
    HealthyDiet,
    BreastSelfExam,
    EnhancedScreening,
    PreventiveMeasures,
    AnnualMammography,
    DiscussFamilyHistory,
    RegularCheckups,
    HealthyLifestyle,
    GeneticCounseling,
    SpecialistConsultation,
}

impl RecommendationKey {
    pub fn text(&self) -> LocalizedText {
        match self {
            RecommendationKey::QuitSmoking => LocalizedText::new(
                "强烈建议戒烟，这是降低肺癌风险最重要的措施",
                "Strongly recommend quitting smoking, which is the most important measure to reduce lung cancer risk",
            ),
            RecommendationKey::AnnualChestCt => LocalizedText::new(
                "建议每年进行胸部CT筛查",
                "Recommend annual chest CT screening",
            ),
            RecommendationKey::AvoidSecondhandSmoke => LocalizedText::new(
                "避免二手烟和空气污染",
                "Avoid secondhand smoke and air pollution",
            ),
            RecommendationKey::WeightControl => LocalizedText::new(
                "建议控制体重，保持健康的BMI",
                "Recommend weight control and maintaining healthy BMI",
            ),
            RecommendationKey::IncreaseActivity => LocalizedText::new(
                "增加体力活动，每周至少150分钟中等强度运动",
                "Increase physical activity, at least 150 minutes of moderate exercise per week",
            ),
            RecommendationKey::HealthyDiet => LocalizedText::new(
                "保持健康饮食，限制糖分和精制碳水化合物摄入",
                "Maintain a healthy diet, limit sugar and refined carbohydrate intake",
            ),
            RecommendationKey::BreastSelfExam => {
                LocalizedText::new("定期进行乳房自我检查", "Regular breast self-examination")
            }
            RecommendationKey::EnhancedScreening => LocalizedText::new(
                "与医生讨论强化筛查方案",
                "Discuss enhanced screening with physician",
            ),
            RecommendationKey::PreventiveMeasures => {
                LocalizedText::new("考虑采取预防性措施", "Consider preventive measures")
            }
            RecommendationKey::AnnualMammography => {
                LocalizedText::new("每年进行乳腺X线筛查", "Annual mammography screening")
            }
            RecommendationKey::DiscussFamilyHistory => LocalizedText::new(
                "与医生讨论家族史",
                "Discuss family history with physician",
            ),
            RecommendationKey::RegularCheckups => LocalizedText::new(
                "定期体检，及时发现和处理健康问题",
                "Regular health checkups to detect and address health issues early",
            ),
            RecommendationKey::HealthyLifestyle => {
                LocalizedText::new("保持健康的生活方式", "Maintain a healthy lifestyle")
            }
            RecommendationKey::GeneticCounseling => {
                LocalizedText::new("建议进行遗传咨询", "Consider genetic counseling")
            }
            RecommendationKey::SpecialistConsultation => LocalizedText::new(
                "建议咨询专科医生，制定个性化的预防方案",
                "Recommend consulting specialists for personalized prevention plans",
            ),
        }
    }
}

/// Recommendation as returned to callers: key plus both language variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub key: RecommendationKey,
    pub zh: &'static str,
    pub en: &'static str,
}

impl From<RecommendationKey> for Recommendation {
    fn from(key: RecommendationKey) -> Self {
        let text = key.text();
        Self {
            key,
            zh: text.zh,
            en: text.en,
        }
    }
}

/// Selects advice keys: disease-specific first, then universal, then escalation for the high
/// tier.
pub fn recommendation_keys(
    strategy: &ScoringStrategy,
    category: RiskCategory,
    factors: &ValidatedFactors,
) -> Vec<RecommendationKey> {
    use RecommendationKey::*;

    let mut keys = Vec::new();
    match strategy {
        ScoringStrategy::LungCancer => {
            if factors.get("smoking_years") > 0.0 {
                keys.push(QuitSmoking);
            }
            if category.is_high_tier() {
                keys.push(AnnualChestCt);
            }
            keys.push(AvoidSecondhandSmoke);
        }
        ScoringStrategy::Diabetes => {
            if factors.get("bmi") > 25.0 {
                keys.push(WeightControl);
            }
            if factors.is("physical_activity", 0) {
                keys.push(IncreaseActivity);
            }
            keys.push(HealthyDiet);
        }
        ScoringStrategy::Panda { .. } => {
            keys.push(BreastSelfExam);
            if category.is_high_tier() {
                keys.extend([EnhancedScreening, PreventiveMeasures]);
            } else if category.is_moderate_tier() {
                keys.extend([AnnualMammography, DiscussFamilyHistory]);
            }
        }
        ScoringStrategy::Generic => {}
    }

    keys.extend([RegularCheckups, HealthyLifestyle]);

    if category.is_high_tier() {
        keys.push(match strategy {
            ScoringStrategy::Panda { .. } => GeneticCounseling,
            _ => SpecialistConsultation,
        });
    }

    keys
}

pub fn recommendations(
    strategy: &ScoringStrategy,
    category: RiskCategory,
    factors: &ValidatedFactors,
) -> Vec<Recommendation> {
    recommendation_keys(strategy, category, factors)
        .into_iter()
        .map(Recommendation::from)
        .collect()
}
