use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use stitchquote::api::{DesignAnalysis, QuoteReport};
use stitchquote::complexity::ComplexityLabel;
use stitchquote::rates::{RateKey, RateTable};
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn label_color(label: ComplexityLabel) -> Color {
    match label {
        ComplexityLabel::Simple => Color::Green,
        ComplexityLabel::Moderate => Color::Yellow,
        ComplexityLabel::Complex | ComplexityLabel::VeryComplex => Color::Red,
    }
}

fn money(v: f64) -> String {
    format!("${:.2}", v)
}

fn hours(v: f64) -> String {
    format!("{:.2} h ({:.0} min)", v, v * 60.0)
}

pub fn print_analysis(name: &str, analysis: &DesignAnalysis) {
    let m = &analysis.metrics;
    let c = &analysis.complexity;

    let mut table = new_table();
    table.set_header(vec![
        Cell::new(format!("Design: {}", name)).add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);

    let rows: Vec<(&str, String)> = vec![
        ("Stitches", m.stitch_count.to_string()),
        ("Jumps", m.jump_count.to_string()),
        ("Trims", m.trim_count.to_string()),
        ("Colors", m.color_count.to_string()),
        (
            "Size",
            format!(
                "{:.2} x {:.2} in ({:.1} x {:.1} mm)",
                m.width_inches, m.height_inches, m.width_mm, m.height_mm
            ),
        ),
        ("Density", format!("{:.5} st/unit²", m.stitch_density)),
        ("Jump ratio", format!("{:.3}", m.jump_ratio)),
        ("Trim ratio", format!("{:.3}", m.trim_ratio)),
        ("Color change ratio", format!("{:.4}", m.color_change_ratio)),
        ("Thread (est.)", format!("{:.1} yd", m.thread_length_yards)),
    ];
    for (k, v) in rows {
        table.add_row(vec![Cell::new(k), Cell::new(v)]);
    }
    table.add_row(vec![
        Cell::new(format!("Complexity ({})", analysis.classifier)).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1} {}", c.score, c.label)).fg(label_color(c.label)),
    ]);
    right_align(&mut table, 1..=1);

    println!("\n{}", table);
    println!("   {}", c.label.description());
}

pub fn print_quote(report: &QuoteReport) {
    let b = &report.breakdown;

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Cost").add_attribute(Attribute::Bold),
        Cell::new("Amount"),
    ]);

    table.add_row(vec![Cell::new("Top thread"), Cell::new(money(b.materials.thread))]);
    table.add_row(vec![Cell::new("Bobbin thread"), Cell::new(money(b.materials.bobbin))]);
    table.add_row(vec![
        Cell::new(format!("Foam ({} pcs)", b.resources.foam_pieces)),
        Cell::new(money(b.materials.foam)),
    ]);
    table.add_row(vec![Cell::new("Stabilizer"), Cell::new(money(b.materials.stabilizer))]);
    table.add_row(vec![
        Cell::new("Materials").add_attribute(Attribute::Bold),
        Cell::new(money(b.materials.total)).add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![Cell::new("Stitching"), Cell::new(hours(b.time.stitching))]);
    table.add_row(vec![Cell::new("Color changes"), Cell::new(hours(b.time.color_change))]);
    table.add_row(vec![Cell::new("Hooping"), Cell::new(hours(b.time.hooping))]);
    table.add_row(vec![
        Cell::new("Production time").add_attribute(Attribute::Bold),
        Cell::new(hours(b.time.total)).add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![Cell::new("Labor"), Cell::new(money(b.fixed.labor))]);
    table.add_row(vec![Cell::new("Machine"), Cell::new(money(b.fixed.machine))]);
    table.add_row(vec![Cell::new("Digitizing"), Cell::new(money(b.fixed.digitizing_fee))]);

    let p = &b.pricing;
    table.add_row(vec![Cell::new("Subtotal"), Cell::new(money(p.subtotal))]);
    if p.premium_factor != 1.0 {
        table.add_row(vec![
            Cell::new(format!("Premium x{:.2}", p.premium_factor)),
            Cell::new(money(p.pre_markup_total)),
        ]);
    }
    table.add_row(vec![
        Cell::new(format!("Markup x{:.2}", p.markup_factor)),
        Cell::new(money(p.marked_up_total)),
    ]);
    let total_label = if p.minimum_applied {
        "Total (minimum)"
    } else {
        "Total"
    };
    table.add_row(vec![
        Cell::new(total_label).add_attribute(Attribute::Bold),
        Cell::new(money(p.total)).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Price per piece").add_attribute(Attribute::Bold),
        Cell::new(money(p.price_per_piece)).fg(Color::Cyan),
    ]);
    right_align(&mut table, 1..=1);
    println!("\n{}", table);

    let r = &b.resources;
    println!(
        "   {} pcs | {} colors | {} heads @ {:.0} spm (rate {:.0}%) | {:.1} yd thread | {} bobbins",
        r.quantity,
        r.color_count,
        r.effective_heads,
        r.effective_stitch_speed,
        r.productivity_rate * 100.0,
        r.thread_yards_total,
        r.bobbins_required
    );
}

pub fn print_rates(rates: &RateTable) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Value"),
        Cell::new("Source"),
        Cell::new("Description"),
    ]);

    for key in RateKey::iter() {
        let source = if rates.is_supplied(key) {
            Cell::new("file").fg(Color::Green)
        } else {
            Cell::new("default")
        };
        table.add_row(vec![
            Cell::new(key.as_ref()),
            Cell::new(format!("{}", rates.get(key))),
            source,
            Cell::new(key.description()),
        ]);
    }
    right_align(&mut table, 1..=1);
    println!("\n{}", table);
}
