//! scopekit Showcase Binary
//!
//! Runs the showcase scenarios and prints a go-test style report.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use scopekit::{showcase, Config, Outcome, Result, Section, ShowcaseError};
use tracing_subscriber::{fmt, EnvFilter};

/// scopekit showcase
#[derive(Parser, Debug)]
#[command(name = "scopekit")]
#[command(about = "Showcase of scoped test helpers")]
#[command(version)]
struct Args {
    /// Delay of each case in the parallel section (milliseconds)
    #[arg(short = 'd', long, default_value = "1000")]
    case_delay_ms: u64,

    /// Skip the scenarios that fail on purpose
    #[arg(long)]
    skip_failing: bool,

    /// Only run these sections (temp_dir, set_env, parallel, helper, cleanup)
    #[arg(short, long = "section")]
    sections: Vec<String>,

    /// Render store contents sorted
    #[arg(long)]
    sorted: bool,

    /// Also write the report to this file
    #[arg(short, long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scopekit=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("scopekit showcase v{}", scopekit::VERSION);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid arguments: {}", e);
            return ExitCode::from(2);
        }
    };

    let outcome = showcase::run(&config);
    print!("{}", outcome);

    tracing::info!(
        scenarios = outcome.count(),
        failed = outcome.failed_count(),
        "Showcase finished"
    );

    match finish(outcome, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ShowcaseError::Scenario(msg)) => {
            tracing::warn!("{}", msg);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn finish(outcome: Outcome, args: &Args) -> Result<()> {
    if let Some(path) = &args.report {
        outcome.write_report(path)?;
        tracing::info!(path = %path.display(), "Report written");
    }
    outcome.into_result()?;
    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let mut builder = Config::builder()
        .case_delay(Duration::from_millis(args.case_delay_ms))
        .include_failing(!args.skip_failing)
        .sorted_render(args.sorted);

    for name in &args.sections {
        builder = builder.section(name.parse::<Section>()?);
    }

    Ok(builder.build())
}
