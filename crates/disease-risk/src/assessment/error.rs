/// Structural failures raised by the risk engine.
///
/// Per-field problems (missing, out-of-range or unknown values) never surface here; they fall
/// back to defaults during validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("disease '{disease_id}' not found")]
    NotFound { disease_id: String },
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("risk computation failed: {0}")]
    Computation(String),
}

impl AssessmentError {
    pub fn not_found(disease_id: impl Into<String>) -> Self {
        Self::NotFound {
            disease_id: disease_id.into(),
        }
    }
}
