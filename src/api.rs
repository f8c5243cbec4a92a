use crate::complexity::{ComplexityClassifier, ComplexityResult};
use crate::error::{DecodeError, QuoteResult, ValidationError};
use crate::job::JobParameters;
use crate::metrics::{DesignMetrics, ManualDesign};
use crate::quote::CostBreakdown;
use crate::rates::RateTable;
use crate::stitch::{decoder, DesignGeometry, StitchStream, UnitScale};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use crate::quote::compute_quote;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignAnalysis {
    /// Absent for hand-entered designs.
    pub geometry: Option<DesignGeometry>,
    pub metrics: DesignMetrics,
    pub complexity: ComplexityResult,
    pub classifier: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReport {
    pub analysis: DesignAnalysis,
    pub params: JobParameters,
    pub breakdown: CostBreakdown,
}

/// Service: decode a stream in its native 0.1 mm units and derive its metrics.
pub fn decode_and_analyze(stream: &StitchStream) -> Result<DesignMetrics, DecodeError> {
    decode_and_analyze_with_scale(stream, &UnitScale::default())
}

pub fn decode_and_analyze_with_scale(
    stream: &StitchStream,
    scale: &UnitScale,
) -> Result<DesignMetrics, DecodeError> {
    let geometry = decoder::decode(stream)?;
    Ok(DesignMetrics::from_geometry(&geometry, scale))
}

/// Service: metrics plus complexity for a decoded stream.
pub fn analyze_stream(
    stream: &StitchStream,
    scale: &UnitScale,
    classifier: &dyn ComplexityClassifier,
) -> Result<DesignAnalysis, DecodeError> {
    let geometry = decoder::decode(stream)?;
    let metrics = DesignMetrics::from_geometry(&geometry, scale);
    Ok(DesignAnalysis {
        geometry: Some(geometry),
        complexity: classifier.classify(&metrics),
        classifier: classifier.name().to_string(),
        metrics,
    })
}

/// Service: metrics plus complexity for a hand-entered summary.
pub fn analyze_manual(
    design: &ManualDesign,
    scale: &UnitScale,
    classifier: &dyn ComplexityClassifier,
) -> Result<DesignAnalysis, ValidationError> {
    let metrics = DesignMetrics::from_manual(design, scale)?;
    Ok(DesignAnalysis {
        geometry: None,
        complexity: classifier.classify(&metrics),
        classifier: classifier.name().to_string(),
        metrics,
    })
}

/// Service: price an analyzed design.
pub fn quote_analysis(
    analysis: DesignAnalysis,
    params: JobParameters,
    rates: &RateTable,
) -> QuoteResult<QuoteReport> {
    let breakdown = compute_quote(&analysis.metrics, &params, rates)?;
    info!(
        "💰 Quoted {} pcs at {:.2} ({:.2}/pc, {})",
        params.quantity,
        breakdown.pricing.total,
        breakdown.pricing.price_per_piece,
        analysis.complexity.label
    );
    Ok(QuoteReport {
        analysis,
        params,
        breakdown,
    })
}

/// Service: decode, classify and price in one call.
pub fn quote_stream(
    stream: &StitchStream,
    scale: &UnitScale,
    params: JobParameters,
    rates: &RateTable,
    classifier: &dyn ComplexityClassifier,
) -> QuoteResult<QuoteReport> {
    let analysis = analyze_stream(stream, scale, classifier)?;
    quote_analysis(analysis, params, rates)
}

pub fn quote_manual(
    design: &ManualDesign,
    params: JobParameters,
    rates: &RateTable,
    classifier: &dyn ComplexityClassifier,
) -> QuoteResult<QuoteReport> {
    let analysis = analyze_manual(design, &UnitScale::default(), classifier)?;
    quote_analysis(analysis, params, rates)
}

/// Service: price independent jobs against one rate snapshot, in parallel.
/// Results keep the order of `jobs`.
pub fn quote_batch(
    jobs: &[(DesignMetrics, JobParameters)],
    rates: &RateTable,
) -> Vec<Result<CostBreakdown, ValidationError>> {
    jobs.par_iter()
        .map(|(metrics, params)| compute_quote(metrics, params, rates))
        .collect()
}
