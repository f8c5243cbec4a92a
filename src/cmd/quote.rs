use crate::reports;
use clap::Args;
use stitchquote::api::{self, QuoteReport};
use stitchquote::config::{Config, ManualDesignArgs, ScaleArgs};
use stitchquote::error::QuoteResult;
use stitchquote::rates::RateTable;
use stitchquote::stitch::loader::load_stream_file;

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Stitch stream (.csv or .json)
    pub stream: String,

    #[command(flatten)]
    pub scale: ScaleArgs,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Args, Debug, Clone)]
pub struct ManualArgs {
    #[command(flatten)]
    pub design: ManualDesignArgs,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: QuoteArgs, rates: &RateTable, json: bool) -> QuoteResult<()> {
    let scale = args.scale.scale()?;
    let stream = load_stream_file(&args.stream)?;
    let classifier = args.config.analysis.classifier();
    let report = api::quote_stream(
        &stream,
        &scale,
        args.config.job.to_params(),
        rates,
        classifier.as_ref(),
    )?;
    print(&args.stream, &report, json)
}

pub fn run_manual(args: ManualArgs, rates: &RateTable, json: bool) -> QuoteResult<()> {
    let classifier = args.config.analysis.classifier();
    let report = api::quote_manual(
        &args.design.to_design(),
        args.config.job.to_params(),
        rates,
        classifier.as_ref(),
    )?;
    print("manual entry", &report, json)
}

fn print(name: &str, report: &QuoteReport, json: bool) -> QuoteResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        reports::print_analysis(name, &report.analysis);
        reports::print_quote(report);
    }
    Ok(())
}
