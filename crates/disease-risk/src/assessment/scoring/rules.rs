//! Point tables for the table-driven strategies and the generic fallback.

use super::super::domain::{FeatureVector, ValidatedFactors};

/// Points for the first bucket whose lower bound `value` exceeds, otherwise zero.
fn bucket(value: f64, table: &[(f64, f64)]) -> f64 {
    table
        .iter()
        .find(|(above, _)| value > *above)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

fn flag_points(factors: &ValidatedFactors, id: &str, points: f64) -> f64 {
    if factors.is(id, 1) {
        points
    } else {
        0.0
    }
}

/// Pack-year style burden: years smoked times daily amount over twenty.
pub fn smoking_index(smoking_years: f64, smoking_amount: f64) -> f64 {
    smoking_years * smoking_amount / 20.0
}

pub(crate) fn lung_cancer_features(factors: &ValidatedFactors) -> FeatureVector {
    let age = bucket(
        factors.get("age"),
        &[(60.0, 30.0), (45.0, 20.0), (30.0, 10.0)],
    );
    let smoking = bucket(
        smoking_index(factors.get("smoking_years"), factors.get("smoking_amount")),
        &[(30.0, 40.0), (20.0, 30.0), (10.0, 20.0), (0.0, 10.0)],
    );

    FeatureVector::default()
        .with("age", age)
        .with("smoking", smoking)
        .with(
            "family_history",
            flag_points(factors, "family_history", 15.0),
        )
        .with(
            "occupational_exposure",
            flag_points(factors, "occupational_exposure", 10.0),
        )
        .with("gender", flag_points(factors, "gender", 5.0))
}

pub(crate) fn diabetes_features(factors: &ValidatedFactors) -> FeatureVector {
    let age = bucket(
        factors.get("age"),
        &[(65.0, 25.0), (45.0, 15.0), (35.0, 10.0)],
    );
    let bmi = bucket(
        factors.get("bmi"),
        &[(30.0, 25.0), (25.0, 15.0), (23.0, 10.0)],
    );
    // Waist cut-offs are not sex-specific.
    let waist = bucket(
        factors.get("waist_circumference"),
        &[(90.0, 15.0), (85.0, 10.0)],
    );
    let systolic = bucket(factors.get("systolic_bp"), &[(140.0, 15.0), (130.0, 10.0)]);
    let activity = if factors.is("physical_activity", 0) {
        10.0
    } else if factors.is("physical_activity", 2) {
        -5.0
    } else {
        0.0
    };

    FeatureVector::default()
        .with("age", age)
        .with("bmi", bmi)
        .with("waist_circumference", waist)
        .with("systolic_bp", systolic)
        .with(
            "family_history",
            flag_points(factors, "family_history", 20.0),
        )
        .with("physical_activity", activity)
}

pub(crate) fn generic_features(factors: &ValidatedFactors) -> FeatureVector {
    FeatureVector::default()
        .with("age", factors.get("age"))
        .with("family_history", factors.get("family_history"))
}

pub(crate) fn points_total(features: &FeatureVector) -> f64 {
    features.iter().map(|(_, points)| points).sum::<f64>()
}

pub(crate) fn generic_age_points(features: &FeatureVector) -> f64 {
    (features.get("age") - 20.0) * 0.5
}

pub(crate) fn generic_family_points(features: &FeatureVector) -> f64 {
    features.get("family_history") * 20.0
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
    fn bucket_boundaries_are_exclusive() {
        let table = [(60.0, 30.0), (45.0, 20.0), (30.0, 10.0)];
        assert_eq!(bucket(60.0, &table), 20.0);
        assert_eq!(bucket(60.5, &table), 30.0);
        assert_eq!(bucket(30.0, &table), 0.0);
    }

    #[test]
    fn smoking_index_is_pack_year_style() {
        assert_eq!(smoking_index(30.0, 20.0), 30.0);
        assert_eq!(smoking_index(0.0, 40.0), 0.0);
    }

    #[test]
    fn lung_points_follow_reference_table() {
        let features = lung_cancer_features(&validated(&[
            ("age", 60.0),
            ("gender", 1.0),
            ("smoking_years", 30.0),
            ("smoking_amount", 20.0),
            ("family_history", 1.0),
            ("occupational_exposure", 1.0),
        ]));

        assert_eq!(features.get("age"), 20.0);
        assert_eq!(features.get("smoking"), 30.0);
        assert_eq!(features.get("family_history"), 15.0);
        assert_eq!(features.get("occupational_exposure"), 10.0);
        assert_eq!(features.get("gender"), 5.0);
        assert_eq!(points_total(&features), 80.0);
    }

    #[test]
    fn high_activity_subtracts_points() {
        let features = diabetes_features(&validated(&[
            ("age", 25.0),
            ("bmi", 22.0),
            ("waist_circumference", 75.0),
            ("systolic_bp", 110.0),
            ("family_history", 0.0),
            ("physical_activity", 2.0),
        ]));

        assert_eq!(features.get("physical_activity"), -5.0);
        assert_eq!(points_total(&features), -5.0);
    }

    #[test]
    fn generic_points_are_linear_in_age() {
        let features = generic_features(&validated(&[("age", 50.0), ("family_history", 1.0)]));
        assert_eq!(generic_age_points(&features), 15.0);
        assert_eq!(generic_family_points(&features), 20.0);
    }
}
