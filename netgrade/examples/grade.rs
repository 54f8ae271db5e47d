//! Score a session's packet-telemetry dump and print the result as
//! JSON, the way the surrounding toolkit reports per-dimension scores:
//!
//! ```text
//! cargo run --example grade -- --report session.json
//! {"network":92.04}
//! ```

use anyhow::{Context as _, Result};
use clap::Parser;
use netgrade::{Evaluator as _, MaxDelay, NetworkEvaluator, NetworkScorer, SessionReport, ThroughputFormulation};
use std::{fs, path::PathBuf};

#[derive(Parser)]
struct Args {
    /// Path to the telemetry dump: a JSON array of packet-statistics
    /// entries, or one entry per line.
    #[arg(long)]
    report: PathBuf,

    /// Delay ceiling, e.g. "400ms".
    #[arg(long, default_value = "400ms")]
    max_delay: MaxDelay,

    /// Throughput formulation: "instant-ratio" or "cumulative-rate".
    #[arg(long, default_value = "instant-ratio")]
    throughput_formulation: ThroughputFormulation,

    /// Write the result object to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = fs::read_to_string(&args.report)
        .with_context(|| format!("failed to read {}", args.report.display()))?;
    let report = if input.trim_start().starts_with('[') {
        SessionReport::from_json_str(&input)?
    } else {
        SessionReport::from_json_lines(&input)?
    };

    let scorer = NetworkScorer::new()
        .with_max_delay(args.max_delay)
        .with_formulation(args.throughput_formulation);
    let evaluator = NetworkEvaluator::with_scorer(scorer);

    let score = evaluator.evaluate(&report)?;
    let mut result = serde_json::Map::new();
    result.insert(evaluator.name().to_owned(), score.into());
    let result = serde_json::Value::Object(result);

    match args.output {
        Some(path) => fs::write(&path, result.to_string())
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{result}"),
    }

    Ok(())
}
