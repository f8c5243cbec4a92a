use crate::reports;
use clap::Args;
use stitchquote::api;
use stitchquote::config::{AnalysisArgs, ScaleArgs};
use stitchquote::error::QuoteResult;
use stitchquote::stitch::loader::load_stream_file;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Stitch stream (.csv or .json)
    pub stream: String,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub scale: ScaleArgs,
}

pub fn run(args: AnalyzeArgs, json: bool) -> QuoteResult<()> {
    let scale = args.scale.scale()?;
    let stream = load_stream_file(&args.stream)?;
    let classifier = args.analysis.classifier();
    let analysis = api::analyze_stream(&stream, &scale, classifier.as_ref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        reports::print_analysis(&args.stream, &analysis);
    }
    Ok(())
}
