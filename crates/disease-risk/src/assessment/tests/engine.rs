use super::common::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;

use crate::assessment::engine::{EngineSettings, ScoreOptions};
use crate::assessment::privacy::PrivacyLevel;
use crate::assessment::recommendations::RecommendationKey;
use crate::assessment::stratify::RiskCategory;
use crate::assessment::{AssessmentError, FactorSet, RiskEngine};

#[test]
fn lean_active_adult_is_low_diabetes_risk() {
    let result = engine()
        .score("diabetes", &low_risk_diabetes(), &ScoreOptions::default())
        .expect("diabetes scores");

    assert!(result.score < 30.0, "score {}", result.score);
    assert_eq!(result.category, RiskCategory::Low);
    assert_eq!(result.metadata.algorithm, "diabetes_points");
    assert!(!result.metadata.federated_mode);
    assert_eq!(result.metadata.privacy_level, None);
}

#[test]
fn metabolic_profile_is_elevated_diabetes_risk() {
    let result = engine()
        .score("diabetes", &high_risk_diabetes(), &ScoreOptions::default())
        .expect("diabetes scores");

    assert!(result.score > 50.0, "score {}", result.score);
    assert_eq!(result.category, RiskCategory::High);
    assert_eq!(
        result.recommendations.last().map(|item| item.key),
        Some(RecommendationKey::SpecialistConsultation)
    );
}

#[test]
fn heavy_smoker_is_high_lung_cancer_risk() {
    let result = engine()
        .score("lung_cancer", &heavy_smoker(), &ScoreOptions::default())
        .expect("lung cancer scores");

    assert!(result.score > 70.0, "score {}", result.score);
    assert_eq!(result.score, 80.0);
    assert_eq!(result.category, RiskCategory::High);
    assert_eq!(result.contributions["smoking"], 30.0);
    assert_eq!(
        result.recommendations.first().map(|item| item.key),
        Some(RecommendationKey::QuitSmoking)
    );
}

#[test]
fn unknown_disease_is_not_found() {
    let error = engine()
        .score("influenza", &heavy_smoker(), &ScoreOptions::default())
        .expect_err("unknown disease rejected");

    assert_eq!(error, AssessmentError::not_found("influenza"));
}

#[test]
fn unknown_disease_wins_over_empty_factors() {
    let error = engine()
        .score("influenza", &FactorSet::new(), &ScoreOptions::default())
        .expect_err("unknown disease rejected");

    assert!(matches!(error, AssessmentError::NotFound { .. }));
}

#[test]
fn empty_factor_set_is_a_validation_error() {
    for disease in ["diabetes", "lung_cancer", "breast_cancer", "stroke"] {
        let error = engine()
            .score(disease, &FactorSet::new(), &ScoreOptions::default())
            .expect_err("empty factors rejected");
        assert!(
            matches!(error, AssessmentError::Validation(_)),
            "{disease}: {error:?}"
        );
    }
}

#[test]
fn generic_diseases_use_the_linear_fallback() {
    let result = engine()
        .score(
            "stroke",
            &factors(&[("age", 60.0), ("family_history", 1.0)]),
            &ScoreOptions::default(),
        )
        .expect("stroke scores");

    assert_eq!(result.score, 40.0);
    assert_eq!(result.category, RiskCategory::Medium);
    assert_eq!(result.metadata.algorithm, "generic_linear");
    assert_eq!(result.contributions["age"], 20.0);
    assert_eq!(result.contributions["family_history"], 20.0);
}

#[test]
fn panda_defaults_enable_privacy_and_federation() {
    let result = engine()
        .score(
            "breast_cancer",
            &breast_cancer_patient(),
            &ScoreOptions::seeded(42),
        )
        .expect("breast cancer scores");

    assert_eq!(result.metadata.algorithm, "panda");
    assert_eq!(result.metadata.algorithm_version, "1.0");
    assert_eq!(result.metadata.privacy_level, Some(PrivacyLevel::High));
    assert!(result.metadata.privacy_noise);
    assert!(result.metadata.federated_mode);
    assert_eq!(result.contributions.len(), 6);
    assert_eq!(
        result.recommendations.first().map(|item| item.key),
        Some(RecommendationKey::BreastSelfExam)
    );
}

#[test]
fn panda_deterministic_run_matches_closed_form() {
    let result = engine()
        .score(
            "breast_cancer",
            &breast_cancer_patient(),
            &ScoreOptions::deterministic(),
        )
        .expect("breast cancer scores");

    // age 0.25*25 + family 30 + reproductive 0.2*15 + density 1.0*20
    let raw: f64 = 0.25 / 60.0 * 25.0 * 100.0 + 30.0 + 0.2 * 15.0 + 20.0;
    let expected = 100.0 / (1.0 + (-0.1 * (raw - 50.0)).exp());

    assert!(
        (result.score - expected).abs() < 1e-9,
        "{} vs {expected}",
        result.score
    );
    assert_eq!(result.category, RiskCategory::HighModerate);
    assert!(!result.metadata.privacy_noise);
    assert!(!result.metadata.federated_mode);
}

#[test]
fn panda_score_never_reaches_the_bounds() {
    let result = engine()
        .score(
            "breast_cancer",
            &factors(&[("age", 18.0)]),
            &ScoreOptions::deterministic(),
        )
        .expect("breast cancer scores");

    assert!(result.score > 0.0 && result.score < 1.0, "{}", result.score);
    assert_eq!(result.category, RiskCategory::Low);
}

#[test]
fn seeded_calls_are_bit_identical() {
    let engine = engine();
    let options = ScoreOptions::seeded(7);

    let first = engine
        .score("breast_cancer", &breast_cancer_patient(), &options)
        .expect("first");
    let second = engine
        .score("breast_cancer", &breast_cancer_patient(), &options)
        .expect("second");

    assert_eq!(first.score.to_bits(), second.score.to_bits());
    assert_eq!(first.contributions, second.contributions);
}

#[test]
fn deterministic_calls_are_bit_identical_without_seed() {
    let engine = engine();
    let first = engine
        .score(
            "breast_cancer",
            &breast_cancer_patient(),
            &ScoreOptions::deterministic(),
        )
        .expect("first");
    let second = engine
        .score(
            "breast_cancer",
            &breast_cancer_patient(),
            &ScoreOptions::deterministic(),
        )
        .expect("second");

    assert_eq!(first.score.to_bits(), second.score.to_bits());
}

#[test]
fn injected_source_matches_seed_option() {
    let engine = engine();
    let seeded = engine
        .score(
            "breast_cancer",
            &breast_cancer_patient(),
            &ScoreOptions::seeded(99),
        )
        .expect("seeded");
    let injected = engine
        .score_with_rng(
            "breast_cancer",
            &breast_cancer_patient(),
            &ScoreOptions::default(),
            &mut StdRng::seed_from_u64(99),
        )
        .expect("injected");

    assert_eq!(seeded.score.to_bits(), injected.score.to_bits());
}

#[test]
fn federated_mode_can_be_requested_for_table_diseases() {
    let options = ScoreOptions {
        federated_mode: Some(true),
        random_seed: Some(3),
        ..ScoreOptions::default()
    };
    let result = engine()
        .score("lung_cancer", &heavy_smoker(), &options)
        .expect("lung cancer scores");

    assert!(result.metadata.federated_mode);
    assert!(result.score > 0.0 && result.score <= 100.0);
    assert_eq!(result.metadata.privacy_level, None);
}

#[test]
fn engine_settings_drive_panda_defaults() {
    let engine = RiskEngine::standard(EngineSettings {
        privacy_level: PrivacyLevel::Low,
        federated_mode: false,
    })
    .expect("engine");

    let result = engine
        .score(
            "breast_cancer",
            &breast_cancer_patient(),
            &ScoreOptions::seeded(1),
        )
        .expect("scores");

    assert_eq!(result.metadata.privacy_level, Some(PrivacyLevel::Low));
    assert!(!result.metadata.federated_mode);
}

#[test]
fn interval_brackets_score() {
    let engine = engine();
    for seed in 0..50 {
        for (disease, factors) in [
            ("breast_cancer", breast_cancer_patient()),
            ("lung_cancer", heavy_smoker()),
            ("diabetes", high_risk_diabetes()),
        ] {
            let result = engine
                .score(disease, &factors, &ScoreOptions::seeded(seed))
                .expect("scores");
            let interval = result.confidence_interval;
            assert!(interval.contains(result.score));
            assert!(interval.low >= 0.0 && interval.high <= 100.0);
        }
    }
}

#[test]
fn out_of_range_inputs_still_score_within_bounds() {
    let result = engine()
        .score(
            "lung_cancer",
            &factors(&[
                ("age", 400.0),
                ("smoking_years", -3.0),
                ("smoking_amount", 10_000.0),
                ("gender", 7.0),
            ]),
            &ScoreOptions::default(),
        )
        .expect("lung cancer scores");

    assert!((0.0..=100.0).contains(&result.score));
    assert_eq!(result.contributions["gender"], 0.0);
    assert_eq!(result.contributions["age"], 30.0);
}

fn seeded_federated_score(
    engine: &RiskEngine,
    disease: &str,
    factors: &FactorSet,
    seed: u64,
) -> (u64, RiskCategory) {
    let options = ScoreOptions {
        federated_mode: Some(true),
        random_seed: Some(seed),
        ..ScoreOptions::default()
    };
    let result = engine.score(disease, factors, &options).expect("scores");
    (result.score.to_bits(), result.category)
}

#[test]
fn shared_engine_scores_concurrently_like_sequential_calls() {
    let engine = Arc::new(engine());
    let cases: Vec<(&'static str, FactorSet, u64)> = (0..12u64)
        .map(|seed| match seed % 3 {
            0 => ("breast_cancer", breast_cancer_patient(), seed),
            1 => ("lung_cancer", heavy_smoker(), seed),
            _ => ("diabetes", high_risk_diabetes(), seed),
        })
        .collect();

    let sequential: Vec<_> = cases
        .iter()
        .map(|(disease, factors, seed)| seeded_federated_score(&engine, disease, factors, *seed))
        .collect();

    let handles: Vec<_> = cases
        .into_iter()
        .map(|(disease, factors, seed)| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || seeded_federated_score(&engine, disease, &factors, seed))
        })
        .collect();
    let concurrent: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("scoring thread completes"))
        .collect();

    assert_eq!(concurrent, sequential);
}
