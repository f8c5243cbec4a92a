use serde::{Deserialize, Serialize};

/// Throughput multipliers applied to nominal stitch speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductivityRates {
    pub baseline: f64,
    pub complex: f64,
    pub device: f64,
    /// Extra factor when complex production runs on the color-changing device.
    pub combined_penalty: f64,
}

impl Default for ProductivityRates {
    fn default() -> Self {
        Self {
            baseline: 1.0,
            complex: 0.8,
            device: 0.75,
            combined_penalty: 0.9,
        }
    }
}

impl ProductivityRates {
    /// Resolves the effective rate.
    ///
    /// Precedence: an override wins outright. Otherwise each flag replaces the
    /// baseline with its own rate, and both flags together take the lower of
    /// the two rates times `combined_penalty`. Rates are never multiplied
    /// together.
    pub fn resolve(&self, complex: bool, device: bool, explicit_override: Option<f64>) -> f64 {
        if let Some(rate) = explicit_override {
            return rate;
        }

        match (complex, device) {
            (true, true) => self.complex.min(self.device) * self.combined_penalty,
            (false, true) => self.device,
            (true, false) => self.complex,
            (false, false) => self.baseline,
        }
    }
}
