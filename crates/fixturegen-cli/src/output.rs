//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use fixturegen_engine::RunReport;

use crate::error::CliResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Serializable view of a run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub fixtures: Vec<FixtureLine>,
    pub failures: Vec<FailureLine>,
}

#[derive(Debug, Serialize)]
pub struct FixtureLine {
    pub type_name: String,
    pub path: String,
    pub constants: usize,
    pub methods: usize,
}

#[derive(Debug, Serialize)]
pub struct FailureLine {
    pub type_name: String,
    pub error: String,
}

impl RunSummary {
    pub fn from_report(report: &RunReport) -> Self {
        Self {
            total: report.outcomes.len(),
            succeeded: report.succeeded(),
            failed: report.failed(),
            fixtures: report
                .fixtures()
                .map(|f| FixtureLine {
                    type_name: f.type_name.clone(),
                    path: f.relative_path.clone(),
                    constants: f.constants.len(),
                    methods: f.methods.len(),
                })
                .collect(),
            failures: report
                .failures()
                .map(|(request, error)| FailureLine {
                    type_name: request.type_name.clone(),
                    error: error.to_string(),
                })
                .collect(),
        }
    }
}

/// Print a run summary in the requested format.
pub fn print_summary(summary: &RunSummary, format: OutputFormat, verb: &str) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(summary)?),
        OutputFormat::Table => {
            for line in &summary.fixtures {
                println!(
                    "  {} {:<40} {} ({} constants, {} methods)",
                    "✓".green(),
                    line.type_name,
                    line.path.dimmed(),
                    line.constants,
                    line.methods
                );
            }
            for line in &summary.failures {
                println!("  {} {:<40} {}", "✗".red(), line.type_name, line.error.red());
            }
            println!();
            let status = if summary.failed == 0 {
                "ok".green().bold()
            } else {
                "failed".red().bold()
            };
            println!(
                "{verb} {}: {} succeeded, {} failed, {} total",
                status, summary.succeeded, summary.failed, summary.total
            );
        }
    }
    Ok(())
}
