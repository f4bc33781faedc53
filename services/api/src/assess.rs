use clap::Args;
use disease_risk::assessment::{
    CategoryListing, DiseaseSchema, FactorKind, FactorSet, PrivacyLevel, RiskEngine, RiskResult,
    ScoreOptions,
};
use disease_risk::config::AppConfig;
use disease_risk::error::AppError;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Disease identifier, e.g. lung_cancer or breast_cancer
    pub(crate) disease: String,
    /// Risk factors as a JSON object, e.g. '{"age": 60, "smoking_years": 30}'
    #[arg(
        long,
        required_unless_present = "factors_file",
        conflicts_with = "factors_file"
    )]
    pub(crate) factors: Option<String>,
    /// Read the JSON factor object from a file instead
    #[arg(long)]
    pub(crate) factors_file: Option<PathBuf>,
    /// Seed every randomized stage for a reproducible score
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Privacy level for strategies that apply Laplace noise (low, medium, high)
    #[arg(long)]
    pub(crate) privacy_level: Option<PrivacyLevel>,
    /// Skip Laplace noise even where the strategy supports it
    #[arg(long)]
    pub(crate) no_privacy_noise: bool,
    /// Force the federated consensus adjustment on or off
    #[arg(long)]
    pub(crate) federated: Option<bool>,
    /// Print the full result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn options(&self) -> ScoreOptions {
        ScoreOptions {
            privacy_level: self.privacy_level,
            privacy_noise: self.no_privacy_noise.then_some(false),
            federated_mode: self.federated,
            random_seed: self.seed,
        }
    }

    fn factor_set(&self) -> Result<FactorSet, AppError> {
        let raw = match (&self.factors, &self.factors_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => String::from("{}"),
        };
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Args, Debug)]
pub(crate) struct DiseasesArgs {
    /// Print the factor schema of this disease instead of the catalog
    pub(crate) disease: Option<String>,
    /// Print JSON instead of a text listing
    #[arg(long)]
    pub(crate) json: bool,
}

fn load_engine() -> Result<RiskEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(RiskEngine::standard(config.engine)?)
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let engine = load_engine()?;
    let factors = args.factor_set()?;
    let result = engine.score(&args.disease, &factors, &args.options())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_result(&result));
    }
    Ok(())
}

pub(crate) fn run_diseases(args: DiseasesArgs) -> Result<(), AppError> {
    let engine = load_engine()?;

    match args.disease {
        Some(disease_id) => {
            let schema = engine.schema(&disease_id)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(schema)?);
            } else {
                print!("{}", render_schema(schema));
            }
        }
        None => {
            let listing = engine.catalog().listing();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print!("{}", render_listing(&listing));
            }
        }
    }
    Ok(())
}

fn render_result(result: &RiskResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Risk assessment: {}", result.disease_id);
    let _ = writeln!(
        out,
        "  Score: {:.1} ({}), interval {:.1}-{:.1}",
        result.score,
        result.category_label.en,
        result.confidence_interval.low,
        result.confidence_interval.high
    );
    let _ = writeln!(
        out,
        "  Algorithm: {} v{}",
        result.metadata.algorithm, result.metadata.algorithm_version
    );
    if let Some(level) = result.metadata.privacy_level {
        let _ = writeln!(
            out,
            "  Privacy: {} (noise {})",
            level,
            if result.metadata.privacy_noise { "on" } else { "off" }
        );
    }
    let _ = writeln!(
        out,
        "  Federated adjustment: {}",
        if result.metadata.federated_mode { "on" } else { "off" }
    );

    let _ = writeln!(out, "  Contributions:");
    for (feature, points) in &result.contributions {
        let _ = writeln!(out, "    - {feature}: {points:.2}");
    }
    let _ = writeln!(out, "  Recommendations:");
    for item in &result.recommendations {
        let _ = writeln!(out, "    - {}", item.en);
    }
    out
}

fn render_listing(listing: &[CategoryListing]) -> String {
    let mut out = String::new();
    for category in listing {
        let _ = writeln!(out, "{}", category.name.en);
        for disease in &category.diseases {
            let _ = writeln!(
                out,
                "  - {} ({}) [{}]",
                disease.id, disease.name.en, disease.algorithm
            );
        }
    }
    out
}

fn render_schema(schema: &DiseaseSchema) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}) [{}]",
        schema.name.en,
        schema.id,
        schema.strategy.algorithm().id
    );
    for factor in &schema.factors {
        match &factor.kind {
            FactorKind::Number { min, max, unit } => {
                let _ = writeln!(
                    out,
                    "  - {}: number {min}..={max}{} (default {})",
                    factor.id,
                    unit.map(|unit| format!(" {unit}")).unwrap_or_default(),
                    factor.default
                );
            }
            FactorKind::Select { options } => {
                let codes = options
                    .iter()
                    .map(|option| format!("{}={}", option.value, option.label.en))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(
                    out,
                    "  - {}: select [{codes}] (default {})",
                    factor.id, factor.default
                );
            }
        }
    }
    out
}
