use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{DiseaseCategory, DiseaseSchema, FactorSpec, LocalizedText, SelectOption};
use super::error::AssessmentError;
use super::scoring::ScoringStrategy;
use super::validation::check_schema;

/// Validated, immutable set of disease schemas served by the engine.
#[derive(Debug, Clone)]
pub struct DiseaseCatalog {
    schemas: BTreeMap<&'static str, DiseaseSchema>,
}

impl DiseaseCatalog {
    /// Builds a catalog, rejecting the whole set if any schema is malformed.
    pub fn try_new(
        schemas: impl IntoIterator<Item = DiseaseSchema>,
    ) -> Result<Self, AssessmentError> {
        let mut by_id = BTreeMap::new();
        for schema in schemas {
            check_schema(&schema)?;
            if by_id.contains_key(schema.id) {
                return Err(AssessmentError::Computation(format!(
                    "disease '{}' registered twice",
                    schema.id
                )));
            }
            by_id.insert(schema.id, schema);
        }

        Ok(Self { schemas: by_id })
    }

    /// Lung cancer, diabetes, breast cancer and the generic-scored catalog entries.
    pub fn standard() -> Result<Self, AssessmentError> {
        Self::try_new(standard_schemas())
    }

    pub fn get(&self, disease_id: &str) -> Option<&DiseaseSchema> {
        self.schemas.get(disease_id)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn schemas(&self) -> impl Iterator<Item = &DiseaseSchema> {
        self.schemas.values()
    }

    /// Diseases grouped by category for navigation menus.
    pub fn listing(&self) -> Vec<CategoryListing> {
        DiseaseCategory::ALL
            .iter()
            .filter_map(|category| {
                let diseases: Vec<DiseaseSummary> = self
                    .schemas
                    .values()
                    .filter(|schema| schema.category == *category)
                    .map(|schema| DiseaseSummary {
                        id: schema.id,
                        name: schema.name,
                        algorithm: schema.strategy.algorithm().id,
                    })
                    .collect();

                (!diseases.is_empty()).then(|| CategoryListing {
                    category: *category,
                    name: category.label(),
                    diseases,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    pub category: DiseaseCategory,
    pub name: LocalizedText,
    pub diseases: Vec<DiseaseSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiseaseSummary {
    pub id: &'static str,
    pub name: LocalizedText,
    pub algorithm: &'static str,
}

fn age_spec() -> FactorSpec {
    FactorSpec::number(
        "age",
        LocalizedText::new("年龄", "Age"),
        (18.0, 100.0),
        "岁/years",
        0.0,
    )
}

fn family_history_spec() -> FactorSpec {
    FactorSpec::yes_no(
        "family_history",
        LocalizedText::new("家族史", "Family History"),
    )
}

fn lung_cancer() -> DiseaseSchema {
    DiseaseSchema {
        id: "lung_cancer",
        name: LocalizedText::new("肺癌", "Lung Cancer"),
        category: DiseaseCategory::Cancer,
        strategy: ScoringStrategy::LungCancer,
        factors: vec![
            age_spec(),
            FactorSpec::select(
                "gender",
                LocalizedText::new("性别", "Gender"),
                vec![
                    SelectOption::new(0, "女", "Female"),
                    SelectOption::new(1, "男", "Male"),
                ],
                0,
            ),
            FactorSpec::number(
                "smoking_years",
                LocalizedText::new("吸烟年数", "Smoking Years"),
                (0.0, 80.0),
                "年/years",
                0.0,
            ),
            FactorSpec::number(
                "smoking_amount",
                LocalizedText::new("每日吸烟量", "Cigarettes per Day"),
                (0.0, 100.0),
                "支/cigarettes",
                0.0,
            ),
            family_history_spec(),
            FactorSpec::yes_no(
                "occupational_exposure",
                LocalizedText::new("职业暴露", "Occupational Exposure"),
            ),
        ],
    }
}

fn diabetes() -> DiseaseSchema {
    DiseaseSchema {
        id: "diabetes",
        name: LocalizedText::new("糖尿病", "Diabetes"),
        category: DiseaseCategory::Metabolic,
        strategy: ScoringStrategy::Diabetes,
        factors: vec![
            age_spec(),
            FactorSpec::number(
                "bmi",
                LocalizedText::new("BMI", "BMI"),
                (15.0, 50.0),
                "kg/m²",
                0.0,
            ),
            FactorSpec::number(
                "waist_circumference",
                LocalizedText::new("腰围", "Waist Circumference"),
                (50.0, 150.0),
                "cm",
                0.0,
            ),
            FactorSpec::number(
                "systolic_bp",
                LocalizedText::new("收缩压", "Systolic Blood Pressure"),
                (80.0, 250.0),
                "mmHg",
                0.0,
            ),
            family_history_spec(),
            FactorSpec::select(
                "physical_activity",
                LocalizedText::new("体力活动", "Physical Activity"),
                vec![
                    SelectOption::new(0, "低", "Low"),
                    SelectOption::new(1, "中", "Moderate"),
                    SelectOption::new(2, "高", "High"),
                ],
                1,
            ),
        ],
    }
}

fn breast_cancer() -> DiseaseSchema {
    DiseaseSchema {
        id: "breast_cancer",
        name: LocalizedText::new("乳腺癌", "Breast Cancer"),
        category: DiseaseCategory::Cancer,
        strategy: ScoringStrategy::panda(),
        factors: vec![
            age_spec(),
            family_history_spec(),
            FactorSpec::select(
                "brca_mutation",
                LocalizedText::new("BRCA突变", "BRCA Mutation"),
                vec![
                    SelectOption::new(0, "无", "None"),
                    SelectOption::new(1, "BRCA1", "BRCA1"),
                    SelectOption::new(2, "BRCA2", "BRCA2"),
                ],
                0,
            ),
            FactorSpec::number(
                "menstrual_age",
                LocalizedText::new("初潮年龄", "Age at Menarche"),
                (8.0, 20.0),
                "岁/years",
                13.0,
            ),
            FactorSpec::number(
                "first_birth_age",
                LocalizedText::new("首次生育年龄", "Age at First Birth"),
                (14.0, 55.0),
                "岁/years",
                25.0,
            ),
            FactorSpec::yes_no(
                "hormone_therapy",
                LocalizedText::new("激素治疗", "Hormone Therapy"),
            ),
            FactorSpec::select(
                "breast_density",
                LocalizedText::new("乳腺密度", "Breast Density"),
                vec![
                    SelectOption::new(0, "脂肪型", "Fatty"),
                    SelectOption::new(1, "散在纤维腺体型", "Scattered Fibroglandular"),
                    SelectOption::new(2, "致密型", "Dense"),
                ],
                0,
            ),
        ],
    }
}

fn generic(id: &'static str, name: LocalizedText, category: DiseaseCategory) -> DiseaseSchema {
    DiseaseSchema {
        id,
        name,
        category,
        strategy: ScoringStrategy::Generic,
        factors: vec![age_spec(), family_history_spec()],
    }
}

pub(crate) fn standard_schemas() -> Vec<DiseaseSchema> {
    vec![
        lung_cancer(),
        diabetes(),
        breast_cancer(),
        generic(
            "esophageal_cancer",
            LocalizedText::new("食管癌", "Esophageal Cancer"),
            DiseaseCategory::Cancer,
        ),
        generic(
            "gastric_cancer",
            LocalizedText::new("胃癌", "Gastric Cancer"),
            DiseaseCategory::Cancer,
        ),
        generic(
            "colorectal_cancer",
            LocalizedText::new("结直肠癌", "Colorectal Cancer"),
            DiseaseCategory::Cancer,
        ),
        generic(
            "liver_cancer",
            LocalizedText::new("肝癌", "Liver Cancer"),
            DiseaseCategory::Cancer,
        ),
        generic(
            "stroke",
            LocalizedText::new("卒中", "Stroke"),
            DiseaseCategory::Cardiovascular,
        ),
        generic(
            "hypertension",
            LocalizedText::new("高血压", "Hypertension"),
            DiseaseCategory::Cardiovascular,
        ),
        generic(
            "copd",
            LocalizedText::new("慢性阻塞性肺疾病", "Chronic Obstructive Pulmonary Disease"),
            DiseaseCategory::Respiratory,
        ),
        generic(
            "hyperlipidemia",
            LocalizedText::new("高血脂", "Hyperlipidemia"),
            DiseaseCategory::Metabolic,
        ),
        generic(
            "hyperuricemia",
            LocalizedText::new("高尿酸血症", "Hyperuricemia"),
            DiseaseCategory::Metabolic,
        ),
    ]
}
