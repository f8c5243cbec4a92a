use crate::error::ValidationError;
use crate::stitch::{DesignGeometry, UnitScale};
use serde::{Deserialize, Serialize};

/// Heuristic: one meter of top thread per this many stitches.
/// An approximation, not a simulation of the stitch path.
pub const STITCHES_PER_METER: f64 = 500.0;
pub const YARDS_PER_METER: f64 = 1.09361;

pub fn thread_yards_per_stitch() -> f64 {
    YARDS_PER_METER / STITCHES_PER_METER
}

pub fn estimate_thread_yards(stitch_count: u64) -> f64 {
    stitch_count as f64 * thread_yards_per_stitch()
}

/// Physical and statistical description of one design. Built once, then read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignMetrics {
    pub width_units: f64,
    pub height_units: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub width_inches: f64,
    pub height_inches: f64,

    /// Stitches per square native unit. Zero when the area is zero.
    pub stitch_density: f64,
    pub jump_ratio: f64,
    pub trim_ratio: f64,
    pub color_change_ratio: f64,

    pub stitch_count: u64,
    pub jump_count: u64,
    pub trim_count: u64,
    pub color_change_count: u64,
    pub color_count: u64,

    pub thread_length_yards: f64,
}

/// Design summary entered by hand instead of decoded from a stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualDesign {
    pub stitch_count: u64,
    pub color_count: u32,
    pub width_inches: f64,
    pub height_inches: f64,
}

fn ratio(count: u64, stitches: u64) -> f64 {
    if stitches == 0 {
        return 0.0;
    }
    (count as f64 / stitches as f64).min(1.0)
}

fn density(stitches: u64, area_units: f64) -> f64 {
    if area_units > 0.0 {
        stitches as f64 / area_units
    } else {
        0.0
    }
}

impl DesignMetrics {
    pub fn from_geometry(geom: &DesignGeometry, scale: &UnitScale) -> Self {
        let width_units = geom.width_units() as f64;
        let height_units = geom.height_units() as f64;

        Self {
            width_units,
            height_units,
            width_mm: width_units / scale.units_per_mm(),
            height_mm: height_units / scale.units_per_mm(),
            width_inches: width_units / scale.units_per_inch(),
            height_inches: height_units / scale.units_per_inch(),
            stitch_density: density(geom.stitch_count, width_units * height_units),
            jump_ratio: ratio(geom.jump_count, geom.stitch_count),
            trim_ratio: ratio(geom.trim_count, geom.stitch_count),
            color_change_ratio: ratio(geom.color_change_count, geom.stitch_count),
            stitch_count: geom.stitch_count,
            jump_count: geom.jump_count,
            trim_count: geom.trim_count,
            color_change_count: geom.color_change_count,
            color_count: geom.color_count,
            thread_length_yards: estimate_thread_yards(geom.stitch_count),
        }
    }

    /// Hand-entered designs carry no jump/trim information, so those ratios are zero.
    pub fn from_manual(design: &ManualDesign, scale: &UnitScale) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("width_inches", design.width_inches),
            ("height_inches", design.height_inches),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeAmount { field, value });
            }
        }
        if design.color_count < 1 {
            return Err(ValidationError::ColorCount(design.color_count));
        }

        let width_units = design.width_inches * scale.units_per_inch();
        let height_units = design.height_inches * scale.units_per_inch();
        let color_changes = u64::from(design.color_count) - 1;

        Ok(Self {
            width_units,
            height_units,
            width_mm: width_units / scale.units_per_mm(),
            height_mm: height_units / scale.units_per_mm(),
            width_inches: design.width_inches,
            height_inches: design.height_inches,
            stitch_density: density(design.stitch_count, width_units * height_units),
            jump_ratio: 0.0,
            trim_ratio: 0.0,
            color_change_ratio: ratio(color_changes, design.stitch_count),
            stitch_count: design.stitch_count,
            jump_count: 0,
            trim_count: 0,
            color_change_count: color_changes,
            color_count: u64::from(design.color_count),
            thread_length_yards: estimate_thread_yards(design.stitch_count),
        })
    }

    pub fn area_sq_inches(&self) -> f64 {
        self.width_inches * self.height_inches
    }

    pub fn area_sq_mm(&self) -> f64 {
        self.width_mm * self.height_mm
    }

    /// Stitch density in physical units, independent of the stream's unit scale.
    pub fn stitches_per_sq_mm(&self) -> f64 {
        density(self.stitch_count, self.area_sq_mm())
    }

    /// Larger of the two sides, in mm.
    pub fn max_side_mm(&self) -> f64 {
        self.width_mm.max(self.height_mm)
    }
}
