use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::scoring::ScoringStrategy;

/// Bilingual display text. The engine only picks which entry applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub zh: &'static str,
    pub en: &'static str,
}

impl LocalizedText {
    pub const fn new(zh: &'static str, en: &'static str) -> Self {
        Self { zh, en }
    }
}

/// Raw value supplied for a risk factor.
///
/// Anything that is not a number, numeric string or boolean is kept as `Other` so that a single
/// malformed field falls back to its default instead of rejecting the whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Number(f64),
    Flag(bool),
    Text(String),
    Other(serde_json::Value),
}

impl FactorValue {
    /// Interprets the raw value as a finite number.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            FactorValue::Number(value) => *value,
            FactorValue::Flag(flag) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            FactorValue::Text(raw) => raw.trim().parse::<f64>().ok()?,
            FactorValue::Other(_) => return None,
        };

        value.is_finite().then_some(value)
    }
}

impl From<f64> for FactorValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FactorValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FactorValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for FactorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Caller supplied risk factors keyed by factor id. Keys need not cover the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorSet(BTreeMap<String, FactorValue>);

impl FactorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<FactorValue>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn with(mut self, id: impl Into<String>, value: impl Into<FactorValue>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn get(&self, id: &str) -> Option<&FactorValue> {
        self.0.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K, V> FromIterator<(K, V)> for FactorSet
where
    K: Into<String>,
    V: Into<FactorValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, value)| (id.into(), value.into()))
                .collect(),
        )
    }
}

/// Option of a categorical factor, identified by its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: i64,
    pub label: LocalizedText,
}

impl SelectOption {
    pub const fn new(value: i64, zh: &'static str, en: &'static str) -> Self {
        Self {
            value,
            label: LocalizedText::new(zh, en),
        }
    }
}

/// Value kind accepted for a factor, serialized in the shape form renderers expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FactorKind {
    Number {
        min: f64,
        max: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<&'static str>,
    },
    Select {
        options: Vec<SelectOption>,
    },
}

/// Declared risk factor within a disease schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorSpec {
    pub id: &'static str,
    pub name: LocalizedText,
    #[serde(flatten)]
    pub kind: FactorKind,
    pub default: f64,
}

impl FactorSpec {
    pub fn number(
        id: &'static str,
        name: LocalizedText,
        (min, max): (f64, f64),
        unit: &'static str,
        default: f64,
    ) -> Self {
        Self {
            id,
            name,
            kind: FactorKind::Number {
                min,
                max,
                unit: Some(unit),
            },
            default,
        }
    }

    pub fn select(
        id: &'static str,
        name: LocalizedText,
        options: Vec<SelectOption>,
        default: i64,
    ) -> Self {
        Self {
            id,
            name,
            kind: FactorKind::Select { options },
            default: default as f64,
        }
    }

    /// Yes/no categorical factor coded 0/1, defaulting to "no".
    pub fn yes_no(id: &'static str, name: LocalizedText) -> Self {
        Self::select(
            id,
            name,
            vec![
                SelectOption::new(0, "无", "No"),
                SelectOption::new(1, "有", "Yes"),
            ],
            0,
        )
    }
}

/// Grouping used by the disease catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseCategory {
    Cancer,
    Cardiovascular,
    Respiratory,
    Metabolic,
}

impl DiseaseCategory {
    pub const ALL: [DiseaseCategory; 4] = [
        DiseaseCategory::Cancer,
        DiseaseCategory::Cardiovascular,
        DiseaseCategory::Respiratory,
        DiseaseCategory::Metabolic,
    ];

    pub fn label(&self) -> LocalizedText {
        match self {
            DiseaseCategory::Cancer => LocalizedText::new("癌症", "Cancer"),
            DiseaseCategory::Cardiovascular => {
                LocalizedText::new("心脑血管疾病", "Cardiovascular Disease")
            }
            DiseaseCategory::Respiratory => LocalizedText::new("呼吸疾病", "Respiratory Disease"),
            DiseaseCategory::Metabolic => LocalizedText::new("代谢性疾病", "Metabolic Disease"),
        }
    }
}

/// Immutable factor schema and scoring strategy of one disease.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseSchema {
    pub id: &'static str,
    pub name: LocalizedText,
    pub category: DiseaseCategory,
    pub strategy: ScoringStrategy,
    #[serde(rename = "risk_factors")]
    pub factors: Vec<FactorSpec>,
}

impl DiseaseSchema {
    pub fn factor(&self, id: &str) -> Option<&FactorSpec> {
        self.factors.iter().find(|spec| spec.id == id)
    }
}

/// Factor values after defaults, clamping and code fallback. Covers every schema factor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedFactors(BTreeMap<&'static str, f64>);

impl ValidatedFactors {
    pub(crate) fn insert(&mut self, id: &'static str, value: f64) {
        self.0.insert(id, value);
    }

    /// Value of a factor, `0.0` when the schema does not declare it.
    pub fn get(&self, id: &str) -> f64 {
        self.0.get(id).copied().unwrap_or(0.0)
    }

    /// True when the categorical code equals `code`.
    pub fn is(&self, id: &str, code: i64) -> bool {
        self.get(id) == code as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.0.iter().map(|(id, value)| (*id, *value))
    }
}

/// Named features consumed by a scoring strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(BTreeMap<&'static str, f64>);

impl FeatureVector {
    pub(crate) fn with(mut self, name: &'static str, value: f64) -> Self {
        self.0.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.0.iter().map(|(name, value)| (*name, *value))
    }

    /// Returns a new vector with every value passed through `f`, in key order.
    pub(crate) fn map_values(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        let values = self.0.iter().map(|(name, value)| (*name, f(*value)));
        Self(values.collect())
    }
}
