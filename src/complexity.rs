//! Production-complexity scoring.
//!
//! Two scoring formulations exist. [`NormalizedClassifier`] (bounded 0–100)
//! is the default; [`WeightedSumClassifier`] (unbounded weighted sum) is kept
//! as an explicit alternate. Both are pure functions of [`DesignMetrics`].

use crate::metrics::DesignMetrics;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum ComplexityLabel {
    Simple,
    Moderate,
    Complex,
    #[strum(to_string = "Very Complex")]
    VeryComplex,
}

impl ComplexityLabel {
    pub fn description(self) -> &'static str {
        match self {
            ComplexityLabel::Simple => "Low complexity (quick, simple design)",
            ComplexityLabel::Moderate => "Medium complexity",
            ComplexityLabel::Complex => "High complexity (detailed, time-intensive)",
            ComplexityLabel::VeryComplex => "Very high complexity (expect slow production)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityResult {
    pub score: f64,
    pub label: ComplexityLabel,
}

pub trait ComplexityClassifier: Send + Sync {
    fn name(&self) -> &'static str;
    fn classify(&self, metrics: &DesignMetrics) -> ComplexityResult;
}

/// Which strategy a caller asked for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
    clap::ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierKind {
    #[default]
    Normalized,
    WeightedSum,
}

impl ClassifierKind {
    pub fn build(self) -> Box<dyn ComplexityClassifier> {
        match self {
            ClassifierKind::Normalized => Box::new(NormalizedClassifier::default()),
            ClassifierKind::WeightedSum => Box::new(WeightedSumClassifier::default()),
        }
    }
}

// === WEIGHTED SUM ===

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedSumWeights {
    pub density: f64,
    pub jump_ratio: f64,
    pub trim_ratio: f64,
    pub color_change_ratio: f64,
}

impl Default for WeightedSumWeights {
    fn default() -> Self {
        Self {
            density: 1000.0,
            jump_ratio: 50.0,
            trim_ratio: 100.0,
            color_change_ratio: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedSumThresholds {
    pub simple_below: f64,
    pub moderate_below: f64,
}

impl Default for WeightedSumThresholds {
    fn default() -> Self {
        Self {
            simple_below: 5.0,
            moderate_below: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightedSumClassifier {
    pub weights: WeightedSumWeights,
    pub thresholds: WeightedSumThresholds,
}

impl WeightedSumClassifier {
    pub fn score(&self, m: &DesignMetrics) -> f64 {
        let w = &self.weights;
        m.stitch_density * w.density
            + m.jump_ratio * w.jump_ratio
            + m.trim_ratio * w.trim_ratio
            + m.color_change_ratio * w.color_change_ratio
    }

    pub fn label(&self, score: f64) -> ComplexityLabel {
        if score < self.thresholds.simple_below {
            ComplexityLabel::Simple
        } else if score < self.thresholds.moderate_below {
            ComplexityLabel::Moderate
        } else {
            ComplexityLabel::Complex
        }
    }
}

impl ComplexityClassifier for WeightedSumClassifier {
    fn name(&self) -> &'static str {
        "weighted-sum"
    }

    fn classify(&self, metrics: &DesignMetrics) -> ComplexityResult {
        let score = self.score(metrics);
        ComplexityResult {
            score,
            label: self.label(score),
        }
    }
}

// === NORMALIZED 0-100 ===

/// Each sub-score is `min(value / full_at, 1) * points`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedScale {
    pub stitch_count_full_at: f64,
    pub stitch_count_points: f64,
    /// Stitches per mm².
    pub density_full_at: f64,
    pub density_points: f64,
    pub color_changes_full_at: f64,
    pub color_change_points: f64,
    /// Longest side in mm.
    pub size_full_at_mm: f64,
    pub size_points: f64,
}

impl Default for NormalizedScale {
    fn default() -> Self {
        Self {
            stitch_count_full_at: 30_000.0,
            stitch_count_points: 40.0,
            density_full_at: 0.01,
            density_points: 30.0,
            color_changes_full_at: 10.0,
            color_change_points: 20.0,
            size_full_at_mm: 200.0,
            size_points: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedThresholds {
    pub simple_below: f64,
    pub moderate_below: f64,
    pub complex_below: f64,
}

impl Default for NormalizedThresholds {
    fn default() -> Self {
        Self {
            simple_below: 30.0,
            moderate_below: 50.0,
            complex_below: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedClassifier {
    pub scale: NormalizedScale,
    pub thresholds: NormalizedThresholds,
}

fn capped(value: f64, full_at: f64, points: f64) -> f64 {
    if full_at <= 0.0 {
        return points;
    }
    (value / full_at).clamp(0.0, 1.0) * points
}

impl NormalizedClassifier {
    pub const MAX_SCORE: f64 = 100.0;

    pub fn score(&self, m: &DesignMetrics) -> f64 {
        let s = &self.scale;
        let total = capped(m.stitch_count as f64, s.stitch_count_full_at, s.stitch_count_points)
            + capped(m.stitches_per_sq_mm(), s.density_full_at, s.density_points)
            + capped(m.color_change_count as f64, s.color_changes_full_at, s.color_change_points)
            + capped(m.max_side_mm(), s.size_full_at_mm, s.size_points);
        total.clamp(0.0, Self::MAX_SCORE)
    }

    pub fn label(&self, score: f64) -> ComplexityLabel {
        let t = &self.thresholds;
        if score < t.simple_below {
            ComplexityLabel::Simple
        } else if score < t.moderate_below {
            ComplexityLabel::Moderate
        } else if score < t.complex_below {
            ComplexityLabel::Complex
        } else {
            ComplexityLabel::VeryComplex
        }
    }
}

impl ComplexityClassifier for NormalizedClassifier {
    fn name(&self) -> &'static str {
        "normalized"
    }

    fn classify(&self, metrics: &DesignMetrics) -> ComplexityResult {
        let score = self.score(metrics);
        ComplexityResult {
            score,
            label: self.label(score),
        }
    }
}
