mod common;

use common::approx;
use rstest::rstest;
use stitchquote::error::ValidationError;
use stitchquote::job::{JobParameters, ThreadWeight};
use stitchquote::metrics::{DesignMetrics, ManualDesign};
use stitchquote::productivity::ProductivityRates;
use stitchquote::quote::compute_quote;
use stitchquote::rates::{RateKey, RateTable};
use stitchquote::stitch::UnitScale;

fn design(stitches: u64, colors: u32, w: f64, h: f64) -> DesignMetrics {
    DesignMetrics::from_manual(
        &ManualDesign {
            stitch_count: stitches,
            color_count: colors,
            width_inches: w,
            height_inches: h,
        },
        &UnitScale::default(),
    )
    .unwrap()
}

fn reference_job() -> JobParameters {
    JobParameters::builder()
        .quantity(100)
        .thread_weight(ThreadWeight::Standard)
        .active_heads(10)
        .digitizing_fee(25.0)
        .minimum_total(50.0)
        .markup_factor(2.0)
        .build()
}

#[test]
fn test_reference_scenario() {
    let rates = RateTable::default();
    let metrics = design(5000, 3, 4.0, 3.0);
    let b = compute_quote(&metrics, &reference_job(), &rates).unwrap();

    let per_stitch =
        rates.thread_cost_per_stitch(ThreadWeight::Standard) + rates.bobbin_cost_per_stitch();
    let materials = per_stitch * 5000.0 * 100.0 + 0.18 * 100.0;
    assert!(approx(b.materials.total, materials));
    assert!(approx(b.materials.stabilizer, 18.0));
    assert_eq!(b.materials.foam, 0.0);

    let stitching = 5000.0 / (750.0 * 60.0) / 10.0;
    let color_change = 2.0 * 20.0 / 3600.0 * 100.0;
    let hooping = 50.0 / 3600.0 * 100.0;
    assert!(approx(b.time.stitching, stitching));
    assert!(approx(b.time.color_change, color_change));
    assert!(approx(b.time.hooping, hooping));
    assert!(approx(b.time.total, stitching + color_change + hooping));

    let labor = b.time.total * 25.0;
    assert!(approx(b.fixed.labor, labor));
    assert_eq!(b.fixed.machine, 0.0);
    assert!(approx(b.fixed.total, labor + 25.0));

    let total = (materials + labor + 25.0) * 2.0;
    assert!(approx(b.pricing.total, total));
    assert!(!b.pricing.minimum_applied);
    assert!(approx(b.pricing.price_per_piece, total / 100.0));
}

#[test]
fn test_quote_is_pure() {
    let rates = RateTable::default();
    let metrics = design(18_000, 7, 5.5, 4.25);
    let params = JobParameters::builder()
        .quantity(37)
        .use_foam(true)
        .complex_production(true)
        .premium_product(true)
        .markup_factor(1.7)
        .build();

    let a = compute_quote(&metrics, &params, &rates).unwrap();
    let b = compute_quote(&metrics, &params, &rates).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.pricing.total.to_bits(), b.pricing.total.to_bits());
}

#[test]
fn test_minimum_total_overrides_markup() {
    let rates = RateTable::default();
    let params = JobParameters::builder()
        .quantity(1)
        .markup_factor(3.0)
        .minimum_total(500.0)
        .build();
    let b = compute_quote(&design(1000, 1, 1.0, 1.0), &params, &rates).unwrap();

    assert!(b.pricing.marked_up_total < 500.0);
    assert!(b.pricing.minimum_applied);
    assert_eq!(b.pricing.total, 500.0);
    assert_eq!(b.pricing.price_per_piece, 500.0);
}

#[test]
fn test_premium_applies_before_markup() {
    let rates = RateTable::default();
    let metrics = design(8000, 2, 3.0, 3.0);
    let plain = reference_job();
    let premium = JobParameters {
        premium_product: true,
        ..reference_job()
    };

    let a = compute_quote(&metrics, &plain, &rates).unwrap();
    let b = compute_quote(&metrics, &premium, &rates).unwrap();
    assert_eq!(b.pricing.premium_factor, 1.2);
    assert!(approx(b.pricing.pre_markup_total, a.pricing.subtotal * 1.2));
    assert!(approx(b.pricing.total, a.pricing.subtotal * 1.2 * 2.0));
}

#[rstest]
#[case(3.0, 3.0, 1)]
#[case(3.0, 3.0034, 2)]
#[case(6.0, 3.0, 2)]
#[case(0.5, 0.5, 1)]
fn test_foam_pieces_round_up(#[case] w: f64, #[case] h: f64, #[case] pieces: u64) {
    let rates = RateTable::default();
    let params = JobParameters::builder().quantity(10).use_foam(true).build();
    let b = compute_quote(&design(1000, 1, w, h), &params, &rates).unwrap();
    assert_eq!(b.resources.foam_pieces, pieces);
    assert!(approx(b.materials.foam, pieces as f64 * 2.45));
}

#[test]
fn test_no_foam_means_no_foam_cost() {
    let rates = RateTable::default();
    let params = JobParameters::builder().quantity(10).build();
    let b = compute_quote(&design(1000, 1, 10.0, 10.0), &params, &rates).unwrap();
    assert_eq!(b.resources.foam_pieces, 0);
    assert_eq!(b.materials.foam, 0.0);
}

#[test]
fn test_color_changing_device_clamps_heads_and_skips_changes() {
    let rates = RateTable::default();
    let metrics = design(9000, 6, 4.0, 4.0);
    let params = JobParameters::builder()
        .quantity(20)
        .active_heads(12)
        .color_changing_device(true)
        .build();
    let b = compute_quote(&metrics, &params, &rates).unwrap();

    assert_eq!(b.resources.effective_heads, 2);
    assert_eq!(b.time.color_change, 0.0);
    assert_eq!(b.resources.productivity_rate, 0.75);
    assert!(approx(b.resources.effective_stitch_speed, 750.0 * 0.75));
    assert!(approx(b.time.stitching, 9000.0 / (562.5 * 60.0) / 2.0));
}

#[test]
fn test_fine_thread_uses_fine_rates() {
    let rates = RateTable::default();
    let metrics = design(4000, 1, 2.0, 2.0);
    let params = JobParameters::builder()
        .quantity(1)
        .thread_weight(ThreadWeight::Fine)
        .build();
    let b = compute_quote(&metrics, &params, &rates).unwrap();

    assert_eq!(b.resources.base_stitch_speed, 400.0);
    assert!(approx(
        b.materials.thread_per_piece,
        rates.thread_cost_per_stitch(ThreadWeight::Fine) * 4000.0
    ));
}

#[test]
fn test_color_count_override_replaces_decoded_count() {
    let rates = RateTable::default();
    let metrics = design(4000, 2, 2.0, 2.0);
    let params = JobParameters::builder().quantity(10).color_count(5).build();
    let b = compute_quote(&metrics, &params, &rates).unwrap();

    assert_eq!(b.resources.color_count, 5);
    assert!(approx(b.time.color_change, 4.0 * 20.0 / 3600.0 * 10.0));
}

#[test]
fn test_productivity_override_wins() {
    let rates = RateTable::default();
    let params = JobParameters::builder()
        .quantity(1)
        .complex_production(true)
        .color_changing_device(true)
        .productivity_override(0.5)
        .build();
    let b = compute_quote(&design(3000, 1, 1.0, 1.0), &params, &rates).unwrap();
    assert_eq!(b.resources.productivity_rate, 0.5);
}

#[test]
fn test_machine_cost_from_rate_table() {
    let rates = RateTable::default()
        .with_rate(RateKey::MachineCostPerHour, 12.0)
        .unwrap();
    let b = compute_quote(&design(5000, 3, 4.0, 3.0), &reference_job(), &rates).unwrap();
    assert!(approx(b.fixed.machine, b.time.total * 12.0));
    assert!(approx(
        b.fixed.total,
        b.fixed.labor + b.fixed.machine + b.fixed.digitizing_fee
    ));
}

#[test]
fn test_bobbins_required() {
    let rates = RateTable::default();
    // 62_000 stitches -> 135.6 yd top thread per piece, 54.2 yd bobbin
    let params = JobParameters::builder().quantity(10).build();
    let b = compute_quote(&design(62_000, 1, 4.0, 4.0), &params, &rates).unwrap();
    let bobbin_yards: f64 = 62_000.0 / 500.0 * 1.09361 * 0.4 * 10.0;
    assert_eq!(b.resources.bobbins_required, (bobbin_yards / 124.0).ceil() as u64);
    assert_eq!(b.resources.bobbins_required, 5);
}

#[test]
fn test_empty_design_is_priced_by_fixed_costs() {
    let rates = RateTable::default();
    let params = JobParameters::builder().quantity(3).digitizing_fee(10.0).build();
    let b = compute_quote(&design(0, 1, 0.0, 0.0), &params, &rates).unwrap();
    assert_eq!(b.time.stitching, 0.0);
    assert_eq!(b.materials.thread, 0.0);
    assert!(b.pricing.total.is_finite());
    assert!(b.pricing.total > 10.0);
}

// === VALIDATION ===

#[rstest]
#[case(JobParameters::builder().quantity(0).build(), ValidationError::Quantity(0))]
#[case(JobParameters::builder().quantity(1).active_heads(0).build(), ValidationError::ActiveHeads(0))]
#[case(JobParameters::builder().quantity(1).markup_factor(-0.5).build(), ValidationError::MarkupFactor(-0.5))]
#[case(JobParameters::builder().quantity(1).digitizing_fee(-1.0).build(), ValidationError::NegativeAmount { field: "digitizing_fee", value: -1.0 })]
#[case(JobParameters::builder().quantity(1).minimum_total(-5.0).build(), ValidationError::NegativeAmount { field: "minimum_total", value: -5.0 })]
#[case(JobParameters::builder().quantity(1).productivity_override(0.0).build(), ValidationError::ProductivityOverride(0.0))]
#[case(JobParameters::builder().quantity(1).color_count(0).build(), ValidationError::ColorCount(0))]
#[case(JobParameters::builder().quantity(1).markup_factor(f64::NAN).build(), ValidationError::NonFinite { field: "markup_factor" })]
fn test_invalid_parameters_rejected(#[case] params: JobParameters, #[case] expected: ValidationError) {
    let rates = RateTable::default();
    let err = compute_quote(&design(1000, 1, 1.0, 1.0), &params, &rates).unwrap_err();
    assert_eq!(err, expected);
}

#[test]
fn test_zero_markup_is_allowed() {
    let rates = RateTable::default();
    let params = JobParameters::builder().quantity(2).markup_factor(0.0).build();
    let b = compute_quote(&design(1000, 1, 1.0, 1.0), &params, &rates).unwrap();
    assert_eq!(b.pricing.total, 0.0);
}

// === PRODUCTIVITY ===

#[rstest]
#[case(false, false, None, 1.0)]
#[case(true, false, None, 0.8)]
#[case(false, true, None, 0.75)]
#[case(true, true, None, 0.75 * 0.9)]
#[case(true, true, Some(0.95), 0.95)]
#[case(false, false, Some(1.3), 1.3)]
fn test_productivity_precedence(
    #[case] complex: bool,
    #[case] device: bool,
    #[case] explicit: Option<f64>,
    #[case] expected: f64,
) {
    let rate = ProductivityRates::default().resolve(complex, device, explicit);
    assert!(approx(rate, expected));
}

#[test]
fn test_combined_penalty_uses_lower_rate() {
    let rates = ProductivityRates {
        complex: 0.6,
        device: 0.9,
        ..Default::default()
    };
    let rate = rates.resolve(true, true, None);
    assert!(approx(rate, 0.6 * 0.9));
    assert!(!approx(rate, 0.6 * 0.9 * 0.9));
}
