use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use serde::Deserialize;
use shadowing_rs::{
    aggregate_cases, CaseReport, ComparisonEngineBuilder, ComparisonError, EngineConfig, Meta,
    Report, SCHEMA_VERSION,
};

#[derive(Debug, Parser)]
#[command(name = "practice_report")]
#[command(about = "Generate deterministic speech-practice comparison reports")]
struct Args {
    /// JSON array of {id, expected, transcribed} cases.
    #[arg(long, env = "SHADOWING_REPORT_CASES_FILE")]
    cases_file: PathBuf,
    /// Report destination; stdout when omitted.
    #[arg(long, env = "SHADOWING_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "SHADOWING_REPORT_MAX_TOKENS")]
    max_tokens: Option<usize>,
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Deserialize)]
struct CaseRow {
    id: String,
    expected: String,
    transcribed: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ComparisonError> {
    let raw = fs::read_to_string(&args.cases_file)
        .map_err(|e| ComparisonError::io("reading cases file", e))?;
    let rows: Vec<CaseRow> =
        serde_json::from_str(&raw).map_err(|e| ComparisonError::json("parsing cases file", e))?;
    tracing::info!(case_count = rows.len(), "loaded comparison cases");

    let config = EngineConfig {
        max_tokens: args.max_tokens.unwrap_or(EngineConfig::DEFAULT_MAX_TOKENS),
    };
    let engine = ComparisonEngineBuilder::new(config).build()?;

    let mut cases = Vec::with_capacity(rows.len());
    for row in rows {
        let result = engine.compare_texts(&row.transcribed, &row.expected)?;
        tracing::debug!(id = row.id.as_str(), accuracy = result.accuracy, "case complete");
        cases.push(CaseReport { id: row.id, result });
    }

    let report = Report {
        schema_version: SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            case_count: cases.len(),
        },
        aggregates: aggregate_cases(&cases),
        cases,
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .map_err(|e| ComparisonError::json("serializing report", e))?;

    match &args.out {
        Some(path) => {
            fs::write(path, rendered).map_err(|e| ComparisonError::io("writing report", e))?;
            tracing::info!(out = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
