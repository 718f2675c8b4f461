use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::analyzer;
use crate::models::{AnalysisResult, RunRecord};
use crate::server;

#[derive(Parser)]
#[command(name = "runlens")]
#[command(author, version, about = "Test-Run Flakiness Analyzer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP analysis service
    Serve {
        /// Address to bind
        #[arg(short, long, env = "RUNLENS_BIND", default_value = "127.0.0.1")]
        bind: String,

        /// Port to listen on
        #[arg(short = 'P', long, env = "RUNLENS_PORT", default_value_t = 8080)]
        port: u16,
    },

    /// Score a single run record from a JSON file
    Analyze {
        /// Path to the run record; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Serve { bind, port } => server::serve(bind, *port).await,
            Commands::Analyze { input } => {
                let raw = match input {
                    Some(path) => std::fs::read_to_string(path)?,
                    None => std::io::read_to_string(std::io::stdin())?,
                };

                let result = analyze_raw(&raw)?;

                // Serialize to JSON
                let json_output = if self.pretty {
                    serde_json::to_string_pretty(&result)?
                } else {
                    serde_json::to_string(&result)?
                };

                // Write to output
                if let Some(output_path) = &self.output {
                    std::fs::write(output_path, json_output)?;
                    info!("Analysis written to: {}", output_path.display());
                } else {
                    println!("{}", json_output);
                }

                Ok(())
            }
        }
    }
}

/// Parses, validates and scores one JSON run record.
fn analyze_raw(raw: &str) -> crate::error::Result<AnalysisResult> {
    let run: RunRecord = serde_json::from_str(raw)?;
    run.validate()?;

    Ok(analyzer::analyze_run(&run))
}

#[cfg(test)]
mod tests {
    use crate::error::RunLensError;

    use super::*;

    #[test]
    fn test_analyze_raw_scores_valid_record() {
        let raw = r#"{
            "release_cycle": "RC-20250328",
            "platform": "android",
            "environment": "test_app",
            "device_id": "Any_Samsung",
            "test_suite": "regression",
            "scenarios_total": 50,
            "scenarios_failed": 4,
            "duration_sec": 3120,
            "retries": 1,
            "diff_size": 344,
            "usage_cpu": 0.47,
            "memory_mb": 812.3
        }"#;

        let result = analyze_raw(raw).expect("valid record");
        assert!((0.0..=1.0).contains(&result.p_flaky));
    }

    #[test]
    fn test_analyze_raw_rejects_invalid_record() {
        let raw = r#"{
            "release_cycle": "RC-20250328",
            "platform": "android",
            "environment": "test_app",
            "device_id": "Any_Samsung",
            "test_suite": "regression",
            "scenarios_total": 50,
            "scenarios_failed": 999,
            "duration_sec": 3120,
            "retries": 1,
            "diff_size": 344,
            "usage_cpu": 0.47,
            "memory_mb": 812.3
        }"#;

        let err = analyze_raw(raw).unwrap_err();
        assert!(matches!(err, RunLensError::InvalidRecord(_)));
    }

    #[test]
    fn test_analyze_raw_rejects_malformed_json() {
        let err = analyze_raw("{not json").unwrap_err();
        assert!(matches!(err, RunLensError::JsonError(_)));
    }
}
