//! Cost pipeline: materials, production time, labor and machine cost,
//! premium surcharge, markup and the minimum-total floor.
//!
//! Every figure is derived from `(DesignMetrics, JobParameters, RateTable)`
//! alone, so identical inputs always produce an identical [`CostBreakdown`].

use crate::error::ValidationError;
use crate::job::JobParameters;
use crate::metrics::DesignMetrics;
use crate::rates::{RateKey, RateTable, BOBBIN_THREAD_RATIO};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const SECONDS_PER_HOUR: f64 = 3600.0;
const MINUTES_PER_HOUR: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialCosts {
    /// Top thread, per piece.
    pub thread_per_piece: f64,
    /// Bobbin thread, per piece.
    pub bobbin_per_piece: f64,
    /// Whole job.
    pub thread: f64,
    /// Whole job.
    pub bobbin: f64,
    pub foam: f64,
    pub stabilizer: f64,
    pub total: f64,
}

/// Hours.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductionTime {
    pub stitching: f64,
    pub color_change: f64,
    pub hooping: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedCosts {
    pub labor: f64,
    pub machine: f64,
    pub digitizing_fee: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pricing {
    /// Materials plus fixed costs.
    pub subtotal: f64,
    /// 1.0 unless the product is premium.
    pub premium_factor: f64,
    pub pre_markup_total: f64,
    pub markup_factor: f64,
    pub marked_up_total: f64,
    /// Set when the floor replaced the marked-up figure.
    pub minimum_applied: bool,
    pub total: f64,
    pub price_per_piece: f64,
}

/// What the job consumes and the machine settings it was timed with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductionResources {
    pub quantity: u32,
    pub color_count: u64,
    pub foam_pieces: u64,
    pub bobbins_required: u64,
    pub thread_yards_per_piece: f64,
    pub thread_yards_total: f64,
    pub productivity_rate: f64,
    pub base_stitch_speed: f64,
    pub effective_stitch_speed: f64,
    pub effective_heads: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub materials: MaterialCosts,
    pub time: ProductionTime,
    pub fixed: FixedCosts,
    pub pricing: Pricing,
    pub resources: ProductionResources,
}

/// Foam pieces for one design; a piece covers `piece_sq_inches`, partial pieces round up.
pub fn foam_pieces(area_sq_inches: f64, piece_sq_inches: f64) -> u64 {
    if area_sq_inches <= 0.0 || piece_sq_inches <= 0.0 {
        return 0;
    }
    (area_sq_inches / piece_sq_inches).ceil() as u64
}

/// Heads the job actually runs on. The color-changing device caps the count.
pub fn effective_heads(params: &JobParameters, rates: &RateTable) -> u32 {
    let requested = params.active_heads;
    if params.color_changing_device {
        return requested.min(rates.device_max_heads());
    }
    if requested > rates.max_heads() {
        warn!(
            "⚠️  {} active heads requested, machine default is {}",
            requested,
            rates.max_heads()
        );
    }
    requested
}

/// Prices one job. Parameters are validated before any arithmetic runs.
pub fn compute_quote(
    metrics: &DesignMetrics,
    params: &JobParameters,
    rates: &RateTable,
) -> Result<CostBreakdown, ValidationError> {
    params.validate()?;

    let quantity = f64::from(params.quantity);
    let stitches = metrics.stitch_count as f64;

    // 1. Thread selection
    let thread_per_stitch = rates.thread_cost_per_stitch(params.thread_weight);
    let base_speed = rates.stitch_speed(params.thread_weight);

    // 2. Materials
    let thread_per_piece = thread_per_stitch * stitches;
    let bobbin_per_piece = rates.bobbin_cost_per_stitch() * stitches;

    let foam_count = if params.use_foam {
        foam_pieces(
            metrics.area_sq_inches(),
            rates.get(RateKey::FoamPieceSqInches),
        )
    } else {
        0
    };
    let foam = foam_count as f64 * rates.get(RateKey::FoamSheetPrice);
    let stabilizer = rates.get(RateKey::StabilizerPricePerPiece) * quantity;

    let thread = thread_per_piece * quantity;
    let bobbin = bobbin_per_piece * quantity;
    let materials = MaterialCosts {
        thread_per_piece,
        bobbin_per_piece,
        thread,
        bobbin,
        foam,
        stabilizer,
        total: thread + bobbin + foam + stabilizer,
    };

    // 3. Throughput
    let productivity = rates.productivity_rates().resolve(
        params.complex_production,
        params.color_changing_device,
        params.productivity_override,
    );
    let effective_speed = base_speed * productivity;
    let heads = effective_heads(params, rates);

    debug!(
        "Quote: rate {:.3}, speed {:.1} -> {:.1} spm, heads {} -> {}",
        productivity, base_speed, effective_speed, params.active_heads, heads
    );

    // 4. Time (hours)
    let color_count = params
        .color_count
        .map(u64::from)
        .unwrap_or(metrics.color_count)
        .max(1);

    let stitching = stitches / (effective_speed * MINUTES_PER_HOUR) / f64::from(heads);
    let color_change = if params.color_changing_device {
        0.0
    } else {
        (color_count - 1) as f64 * rates.get(RateKey::ColorChangeSeconds) / SECONDS_PER_HOUR
            * quantity
    };
    let hooping = rates.get(RateKey::HoopingSeconds) / SECONDS_PER_HOUR * quantity;
    let time = ProductionTime {
        stitching,
        color_change,
        hooping,
        total: stitching + color_change + hooping,
    };

    // 5. Money from time
    let labor = time.total * rates.get(RateKey::HourlyLaborRate);
    let machine = time.total * rates.get(RateKey::MachineCostPerHour);
    let fixed = FixedCosts {
        labor,
        machine,
        digitizing_fee: params.digitizing_fee,
        total: labor + machine + params.digitizing_fee,
    };

    // 6-9. Premium, markup, floor, unit price
    let subtotal = materials.total + fixed.total;
    let premium_factor = if params.premium_product {
        rates.get(RateKey::PremiumMultiplier)
    } else {
        1.0
    };
    let pre_markup_total = subtotal * premium_factor;
    let marked_up_total = pre_markup_total * params.markup_factor;
    let minimum_applied = marked_up_total < params.minimum_total;
    let total = if minimum_applied {
        params.minimum_total
    } else {
        marked_up_total
    };

    let pricing = Pricing {
        subtotal,
        premium_factor,
        pre_markup_total,
        markup_factor: params.markup_factor,
        marked_up_total,
        minimum_applied,
        total,
        price_per_piece: total / quantity,
    };

    let yards_per_piece = metrics.thread_length_yards;
    let yards_total = yards_per_piece * quantity;
    let bobbin_yards = yards_total * BOBBIN_THREAD_RATIO;
    let resources = ProductionResources {
        quantity: params.quantity,
        color_count,
        foam_pieces: foam_count,
        bobbins_required: (bobbin_yards / rates.get(RateKey::BobbinYards)).ceil() as u64,
        thread_yards_per_piece: yards_per_piece,
        thread_yards_total: yards_total,
        productivity_rate: productivity,
        base_stitch_speed: base_speed,
        effective_stitch_speed: effective_speed,
        effective_heads: heads,
    };

    Ok(CostBreakdown {
        materials,
        time,
        fixed,
        pricing,
        resources,
    })
}
