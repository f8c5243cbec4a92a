use crate::complexity::{ClassifierKind, ComplexityClassifier};
use crate::error::{QuoteResult, ValidationError};
use crate::job::{JobParameters, ThreadWeight};
use crate::metrics::ManualDesign;
use crate::rates::RateTable;
use crate::stitch::types::NATIVE_UNITS_PER_MM;
use crate::stitch::UnitScale;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub job: JobArgs,
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,
    #[arg(long, value_enum, default_value_t = ThreadWeight::Standard)]
    pub thread_weight: ThreadWeight,
    #[arg(long, default_value_t = 1)]
    pub active_heads: u32,

    // === OPTIONS ===
    #[arg(long, default_value_t = false)]
    pub foam: bool,
    #[arg(long, default_value_t = false)]
    pub complex: bool,
    #[arg(long, default_value_t = false)]
    pub coloreel: bool,
    #[arg(long, default_value_t = false)]
    pub premium: bool,

    // === PRICING ===
    #[arg(long, default_value_t = 0.0)]
    pub digitizing_fee: f64,
    #[arg(long, default_value_t = 0.0)]
    pub minimum_total: f64,
    #[arg(long, default_value_t = 1.0)]
    pub markup: f64,

    // === OVERRIDES ===
    #[arg(long)]
    pub productivity: Option<f64>,
    #[arg(long)]
    pub colors: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    #[arg(long, value_enum, default_value_t = ClassifierKind::Normalized)]
    pub classifier: ClassifierKind,
}

#[derive(Args, Debug, Clone)]
pub struct ScaleArgs {
    /// Native stream units per millimeter
    #[arg(long, default_value_t = NATIVE_UNITS_PER_MM)]
    pub units_per_mm: f64,
}

#[derive(Args, Debug, Clone)]
pub struct ManualDesignArgs {
    #[arg(long)]
    pub stitches: u64,
    #[arg(long, default_value_t = 1)]
    pub design_colors: u32,
    #[arg(long)]
    pub width: f64,
    #[arg(long)]
    pub height: f64,
}

#[derive(Args, Debug, Clone)]
pub struct RateArgs {
    /// JSON rate file; absent keys use documented defaults.
    #[arg(global = true, long)]
    pub rates: Option<String>,
    /// Reject unknown keys in the rate file.
    #[arg(global = true, long, default_value_t = false)]
    pub strict_rates: bool,
}

impl JobArgs {
    pub fn to_params(&self) -> JobParameters {
        JobParameters {
            quantity: self.quantity,
            thread_weight: self.thread_weight,
            use_foam: self.foam,
            active_heads: self.active_heads,
            complex_production: self.complex,
            color_changing_device: self.coloreel,
            digitizing_fee: self.digitizing_fee,
            premium_product: self.premium,
            minimum_total: self.minimum_total,
            markup_factor: self.markup,
            productivity_override: self.productivity,
            color_count: self.colors,
        }
    }
}

impl AnalysisArgs {
    pub fn classifier(&self) -> Box<dyn ComplexityClassifier> {
        self.classifier.build()
    }
}

impl ScaleArgs {
    pub fn scale(&self) -> Result<UnitScale, ValidationError> {
        UnitScale::new(self.units_per_mm)
    }
}

impl ManualDesignArgs {
    pub fn to_design(&self) -> ManualDesign {
        ManualDesign {
            stitch_count: self.stitches,
            color_count: self.design_colors,
            width_inches: self.width,
            height_inches: self.height,
        }
    }
}

impl RateArgs {
    pub fn load(&self) -> QuoteResult<RateTable> {
        match &self.rates {
            Some(path) => RateTable::load_from_file(path, self.strict_rates),
            None => Ok(RateTable::default()),
        }
    }
}
