use clap::{Parser, Subcommand};
use stitchquote::config::RateArgs;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    rates: RateArgs,

    /// Print machine-readable JSON instead of tables
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a stitch stream and report metrics and complexity
    Analyze(cmd::analyze::AnalyzeArgs),
    /// Price a job from a stitch stream
    Quote(cmd::quote::QuoteArgs),
    /// Price a job from a hand-entered design summary
    Manual(cmd::quote::ManualArgs),
    /// Show the effective rate table
    Rates,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing StitchQuote...");

    let rates = cli.rates.load().unwrap_or_else(|e| {
        error!("❌ Could not load rate table: {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Analyze(args) => cmd::analyze::run(args, cli.json),
        Commands::Quote(args) => cmd::quote::run(args, &rates, cli.json),
        Commands::Manual(args) => cmd::quote::run_manual(args, &rates, cli.json),
        Commands::Rates => cmd::rates::run(&rates, cli.json),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
