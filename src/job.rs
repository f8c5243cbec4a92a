use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use typed_builder::TypedBuilder;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ThreadWeight {
    /// 40wt thread on 5500 yd cones.
    #[default]
    #[strum(to_string = "standard", serialize = "40wt")]
    #[value(alias = "40wt")]
    Standard,
    /// 60wt thread on 1100 yd spools.
    #[strum(to_string = "fine", serialize = "60wt")]
    #[value(alias = "60wt")]
    Fine,
}

/// One pricing request. Built once, validated, then read by the cost pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct JobParameters {
    pub quantity: u32,
    #[builder(default)]
    #[serde(default)]
    pub thread_weight: ThreadWeight,
    #[builder(default = false)]
    #[serde(default)]
    pub use_foam: bool,
    #[builder(default = 1)]
    #[serde(default = "default_active_heads")]
    pub active_heads: u32,
    #[builder(default = false)]
    #[serde(default)]
    pub complex_production: bool,
    #[builder(default = false)]
    #[serde(default)]
    pub color_changing_device: bool,
    #[builder(default = 0.0)]
    #[serde(default)]
    pub digitizing_fee: f64,
    #[builder(default = false)]
    #[serde(default)]
    pub premium_product: bool,
    #[builder(default = 0.0)]
    #[serde(default)]
    pub minimum_total: f64,
    #[builder(default = 1.0)]
    #[serde(default = "default_markup_factor")]
    pub markup_factor: f64,

    /// Replaces the resolved productivity rate when set.
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub productivity_override: Option<f64>,
    /// Operator-corrected color count. Replaces the decoded one for color-change time.
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub color_count: Option<u32>,
}

fn default_active_heads() -> u32 {
    1
}

fn default_markup_factor() -> f64 {
    1.0
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(())
}

impl JobParameters {
    /// Rejects parameters the cost pipeline cannot price. Nothing is clamped here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity < 1 {
            return Err(ValidationError::Quantity(self.quantity));
        }
        if self.active_heads < 1 {
            return Err(ValidationError::ActiveHeads(self.active_heads));
        }
        non_negative("digitizing_fee", self.digitizing_fee)?;
        non_negative("minimum_total", self.minimum_total)?;

        if !self.markup_factor.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "markup_factor",
            });
        }
        if self.markup_factor < 0.0 {
            return Err(ValidationError::MarkupFactor(self.markup_factor));
        }

        if let Some(rate) = self.productivity_override {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ValidationError::ProductivityOverride(rate));
            }
        }
        if let Some(colors) = self.color_count {
            if colors < 1 {
                return Err(ValidationError::ColorCount(colors));
            }
        }
        Ok(())
    }
}
