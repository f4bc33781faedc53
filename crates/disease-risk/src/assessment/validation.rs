use tracing::debug;

use super::domain::{DiseaseSchema, FactorKind, FactorSet, ValidatedFactors};
use super::error::AssessmentError;

/// Resolves caller factors against a schema.
///
/// Fails only when no factors are supplied. Missing or uninterpretable values take the declared
/// default, numeric values are clamped into range, and unknown categorical codes fall back to the
/// default code. Keys the schema does not declare are ignored.
pub fn validate_factors(
    schema: &DiseaseSchema,
    factors: &FactorSet,
) -> Result<ValidatedFactors, AssessmentError> {
    if factors.is_empty() {
        return Err(AssessmentError::Validation(
            "missing risk factors".to_string(),
        ));
    }

    let mut validated = ValidatedFactors::default();
    for spec in &schema.factors {
        let Some(raw) = factors.get(spec.id) else {
            validated.insert(spec.id, spec.default);
            continue;
        };

        let Some(value) = raw.as_number() else {
            debug!(
                disease = schema.id,
                factor = spec.id,
                ?raw,
                "factor value not numeric; using default"
            );
            validated.insert(spec.id, spec.default);
            continue;
        };

        let resolved = match &spec.kind {
            FactorKind::Number { min, max, .. } => {
                let clamped = value.clamp(*min, *max);
                if clamped != value {
                    debug!(
                        disease = schema.id,
                        factor = spec.id,
                        value,
                        clamped,
                        "factor value clamped into range"
                    );
                }
                clamped
            }
            FactorKind::Select { options } => {
                if options.iter().any(|option| option.value as f64 == value) {
                    value
                } else {
                    debug!(
                        disease = schema.id,
                        factor = spec.id,
                        value,
                        "unknown option code; using default"
                    );
                    spec.default
                }
            }
        };
        validated.insert(spec.id, resolved);
    }

    Ok(validated)
}

/// Structural checks applied to a schema before the engine serves it.
pub(crate) fn check_schema(schema: &DiseaseSchema) -> Result<(), AssessmentError> {
    let malformed =
        |detail: String| AssessmentError::Computation(format!("schema '{}': {detail}", schema.id));

    if schema.id.trim().is_empty() {
        return Err(malformed("empty disease id".to_string()));
    }
    if schema.factors.is_empty() {
        return Err(malformed("no risk factors declared".to_string()));
    }

    for (index, spec) in schema.factors.iter().enumerate() {
        if schema.factors[..index]
            .iter()
            .any(|other| other.id == spec.id)
        {
            return Err(malformed(format!("factor '{}' declared twice", spec.id)));
        }

        match &spec.kind {
            FactorKind::Number { min, max, .. } => {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(malformed(format!(
                        "factor '{}' has invalid bounds [{min}, {max}]",
                        spec.id
                    )));
                }
            }
            FactorKind::Select { options } => {
                if options.is_empty() {
                    return Err(malformed(format!("factor '{}' has no options", spec.id)));
                }
                if !options
                    .iter()
                    .any(|option| option.value as f64 == spec.default)
                {
                    return Err(malformed(format!(
                        "factor '{}' default {} is not an option",
                        spec.id, spec.default
                    )));
                }
            }
        }
    }

    for feature_factor in schema.strategy.required_factors() {
        if schema.factor(feature_factor).is_none() {
            return Err(malformed(format!(
                "strategy reads undeclared factor '{feature_factor}'"
            )));
        }
    }

    schema.strategy.check().map_err(malformed)
}
