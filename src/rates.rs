//! Rate table: prices, machine speeds and production rates.
//!
//! A table only stores the keys its source supplied. Every lookup goes
//! through [`RateTable::get`], which falls back to the key's documented
//! default, so a partially filled settings store still prices correctly.

use crate::error::{ConfigError, QuoteResult};
use crate::job::ThreadWeight;
use crate::metrics::thread_yards_per_stitch;
use crate::productivity::ProductivityRates;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use strum::{
    AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr,
};
use tracing::{debug, info, warn};

pub const STANDARD_SPOOL_YARDS: f64 = 5500.0;
pub const FINE_SPOOL_YARDS: f64 = 1100.0;
pub const BOBBIN_PACK_SIZE: f64 = 144.0;
/// Bobbin thread used per yard of top thread.
pub const BOBBIN_THREAD_RATIO: f64 = 0.4;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
pub enum RateKey {
    // === MATERIALS ===
    #[strum(serialize = "POLYNEON_5500YD_PRICE")]
    StandardSpoolPrice,
    #[strum(serialize = "POLYNEON_1100YD_PRICE")]
    FineSpoolPrice,
    #[strum(serialize = "BOBBIN_144_PRICE")]
    BobbinPackPrice,
    #[strum(serialize = "BOBBIN_YARDS")]
    BobbinYards,
    #[strum(serialize = "FOAM_SHEET_PRICE")]
    FoamSheetPrice,
    #[strum(serialize = "FOAM_PIECE_SQ_INCHES")]
    FoamPieceSqInches,
    #[strum(serialize = "STABILIZER_PRICE_PER_PIECE")]
    StabilizerPricePerPiece,

    // === MACHINE ===
    #[strum(serialize = "DEFAULT_STITCH_SPEED_40WT")]
    StandardStitchSpeed,
    #[strum(serialize = "DEFAULT_STITCH_SPEED_60WT")]
    FineStitchSpeed,
    #[strum(serialize = "DEFAULT_MAX_HEADS")]
    MaxHeads,
    #[strum(serialize = "DEFAULT_COLOREEL_MAX_HEADS")]
    DeviceMaxHeads,
    #[strum(serialize = "HOOPING_TIME_DEFAULT")]
    HoopingSeconds,
    #[strum(serialize = "COLOR_CHANGE_SECONDS")]
    ColorChangeSeconds,
    #[strum(serialize = "MACHINE_OPERATING_COST_PER_HOUR")]
    MachineCostPerHour,

    // === LABOR & PRODUCTIVITY ===
    #[strum(serialize = "HOURLY_LABOR_RATE")]
    HourlyLaborRate,
    #[strum(serialize = "DEFAULT_PRODUCTIVITY_RATE")]
    BaselineProductivity,
    #[strum(serialize = "COMPLEX_PRODUCTIVITY_RATE")]
    ComplexProductivity,
    #[strum(serialize = "COLOREEL_PRODUCTIVITY_RATE")]
    DeviceProductivity,

    // === PRICING ===
    #[strum(serialize = "PREMIUM_MULTIPLIER")]
    PremiumMultiplier,
}

impl RateKey {
    /// Value used when the table does not supply the key.
    pub fn default_value(self) -> f64 {
        match self {
            RateKey::StandardSpoolPrice => 9.69,
            RateKey::FineSpoolPrice => 3.19,
            RateKey::BobbinPackPrice => 35.85,
            RateKey::BobbinYards => 124.0,
            RateKey::FoamSheetPrice => 2.45,
            RateKey::FoamPieceSqInches => 9.0,
            RateKey::StabilizerPricePerPiece => 0.18,
            RateKey::StandardStitchSpeed => 750.0,
            RateKey::FineStitchSpeed => 400.0,
            RateKey::MaxHeads => 15.0,
            RateKey::DeviceMaxHeads => 2.0,
            RateKey::HoopingSeconds => 50.0,
            RateKey::ColorChangeSeconds => 20.0,
            RateKey::MachineCostPerHour => 0.0,
            RateKey::HourlyLaborRate => 25.0,
            RateKey::BaselineProductivity => 1.0,
            RateKey::ComplexProductivity => 0.8,
            RateKey::DeviceProductivity => 0.75,
            RateKey::PremiumMultiplier => 1.2,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RateKey::StandardSpoolPrice => "Price for 5500 yard Polyneon thread spool",
            RateKey::FineSpoolPrice => "Price for 1100 yard Polyneon thread spool",
            RateKey::BobbinPackPrice => "Price for a pack of 144 bobbins",
            RateKey::BobbinYards => "Yards of thread per bobbin",
            RateKey::FoamSheetPrice => "Price per foam sheet",
            RateKey::FoamPieceSqInches => "Design area covered by one foam piece (sq in)",
            RateKey::StabilizerPricePerPiece => "Price per piece of stabilizer backing",
            RateKey::StandardStitchSpeed => "Default stitch speed for 40wt thread (rpm)",
            RateKey::FineStitchSpeed => "Default stitch speed for 60wt thread (rpm)",
            RateKey::MaxHeads => "Default maximum machine heads",
            RateKey::DeviceMaxHeads => "Maximum machine heads when using Coloreel",
            RateKey::HoopingSeconds => "Default time to hoop an item (seconds)",
            RateKey::ColorChangeSeconds => "Time per manual color change (seconds)",
            RateKey::MachineCostPerHour => "Machine operating cost ($/hour)",
            RateKey::HourlyLaborRate => "Hourly labor rate ($/hour)",
            RateKey::BaselineProductivity => "Baseline productivity rate",
            RateKey::ComplexProductivity => "Productivity rate for complex production",
            RateKey::DeviceProductivity => "Productivity rate with Coloreel enabled",
            RateKey::PremiumMultiplier => "Surcharge factor for premium products",
        }
    }

    /// Keys used as divisors or speed factors: zero is as invalid as negative.
    pub fn must_be_positive(self) -> bool {
        matches!(
            self,
            RateKey::BobbinYards
                | RateKey::FoamPieceSqInches
                | RateKey::StandardStitchSpeed
                | RateKey::FineStitchSpeed
                | RateKey::MaxHeads
                | RateKey::DeviceMaxHeads
                | RateKey::BaselineProductivity
                | RateKey::ComplexProductivity
                | RateKey::DeviceProductivity
        )
    }

    fn check(self, value: f64) -> Result<f64, ConfigError> {
        let key = self.as_ref().to_string();
        if !value.is_finite() {
            return Err(ConfigError::NonFiniteRate { key });
        }
        if value < 0.0 {
            return Err(ConfigError::NegativeRate { key, value });
        }
        if value == 0.0 && self.must_be_positive() {
            return Err(ConfigError::ZeroRate { key });
        }
        Ok(value)
    }
}

/// Settings-store rows carry a description next to the value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RateValue {
    Plain(f64),
    Setting {
        value: f64,
        #[serde(default)]
        #[allow(dead_code)]
        description: Option<String>,
    },
}

impl RateValue {
    fn value(&self) -> f64 {
        match self {
            RateValue::Plain(v) => *v,
            RateValue::Setting { value, .. } => *value,
        }
    }
}

/// Immutable snapshot of configured rates, passed into each quote.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateTable {
    values: BTreeMap<RateKey, f64>,
}

impl RateTable {
    /// Builds a table from named entries. Unknown names are skipped with a
    /// warning, or rejected when `strict` is set.
    pub fn from_entries<I, S>(entries: I, strict: bool) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (name, value) in entries {
            let name = name.as_ref().trim();
            match name.parse::<RateKey>() {
                Ok(key) => {
                    table.values.insert(key, key.check(value)?);
                }
                Err(_) if strict => return Err(ConfigError::UnknownKey(name.to_string())),
                Err(_) => warn!("⚠️  Ignoring unknown rate key '{}'", name),
            }
        }
        Ok(table)
    }

    pub fn load_from_reader<R: Read>(reader: R, strict: bool) -> QuoteResult<Self> {
        // Sorted so strict mode always reports the same unknown key.
        let raw: BTreeMap<String, RateValue> = serde_json::from_reader(reader)?;
        let table = Self::from_entries(raw.iter().map(|(k, v)| (k.as_str(), v.value())), strict)?;
        debug!(
            "   Rate table supplies {} of {} keys",
            table.values.len(),
            RateKey::COUNT
        );
        for key in RateKey::iter().filter(|k| !table.is_supplied(*k)) {
            debug!("   {} not set, using default {}", key, key.default_value());
        }
        Ok(table)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P, strict: bool) -> QuoteResult<Self> {
        let path = path.as_ref();
        info!("⚖️  Loading rates from: {}", path.display());
        let file = File::open(path)?;
        Self::load_from_reader(BufReader::new(file), strict)
    }

    pub fn with_rate(mut self, key: RateKey, value: f64) -> Result<Self, ConfigError> {
        self.values.insert(key, key.check(value)?);
        Ok(self)
    }

    pub fn get(&self, key: RateKey) -> f64 {
        match self.values.get(&key) {
            Some(&v) => v,
            None => key.default_value(),
        }
    }

    pub fn is_supplied(&self, key: RateKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Every key with its effective value, defaults filled in.
    pub fn effective(&self) -> BTreeMap<&'static str, f64> {
        RateKey::iter()
            .map(|k| (<&'static str>::from(k), self.get(k)))
            .collect()
    }

    // === DERIVED RATES ===

    pub fn spool(&self, weight: ThreadWeight) -> (f64, f64) {
        match weight {
            ThreadWeight::Standard => (self.get(RateKey::StandardSpoolPrice), STANDARD_SPOOL_YARDS),
            ThreadWeight::Fine => (self.get(RateKey::FineSpoolPrice), FINE_SPOOL_YARDS),
        }
    }

    pub fn thread_cost_per_stitch(&self, weight: ThreadWeight) -> f64 {
        let (price, yards) = self.spool(weight);
        price / yards * thread_yards_per_stitch()
    }

    pub fn bobbin_price_each(&self) -> f64 {
        self.get(RateKey::BobbinPackPrice) / BOBBIN_PACK_SIZE
    }

    pub fn bobbin_cost_per_stitch(&self) -> f64 {
        BOBBIN_THREAD_RATIO * thread_yards_per_stitch() * self.bobbin_price_each()
            / self.get(RateKey::BobbinYards)
    }

    pub fn stitch_speed(&self, weight: ThreadWeight) -> f64 {
        match weight {
            ThreadWeight::Standard => self.get(RateKey::StandardStitchSpeed),
            ThreadWeight::Fine => self.get(RateKey::FineStitchSpeed),
        }
    }

    pub fn max_heads(&self) -> u32 {
        head_count(self.get(RateKey::MaxHeads))
    }

    pub fn device_max_heads(&self) -> u32 {
        head_count(self.get(RateKey::DeviceMaxHeads))
    }

    pub fn productivity_rates(&self) -> ProductivityRates {
        ProductivityRates {
            baseline: self.get(RateKey::BaselineProductivity),
            complex: self.get(RateKey::ComplexProductivity),
            device: self.get(RateKey::DeviceProductivity),
            ..ProductivityRates::default()
        }
    }
}

fn head_count(value: f64) -> u32 {
    value.floor().max(1.0) as u32
}
