//! fixturegen CLI - generate test fixture sources from a type catalog
//!
//! ```text
//! fixturegen generate --catalog types.json --out src/test/java --seed 7
//! fixturegen check --catalog types.yaml
//! ```
//!
//! A catalog is a JSON or YAML list of type descriptions. Every type marked
//! `fixture: true` (or each `--type`) gets one generated source file.

#![deny(unsafe_code)]

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fixturegen_engine::{FixtureEngine, GenerationRequest, RunReport};

pub mod catalog;
pub mod config;
mod error;
mod output;

pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, RunSummary};

/// fixturegen CLI application
#[derive(Parser)]
#[command(name = "fixturegen")]
#[command(about = "Generate test fixture sources from type descriptions", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "FIXTUREGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, global = true, default_value = "table")]
    output: OutputFormat,

    /// Log level
    #[arg(long, global = true, env = "FIXTUREGEN_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true, env = "FIXTUREGEN_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Generate fixture sources
    Generate(GenerateArgs),

    /// Validate a catalog without writing anything
    Check(CatalogArgs),
}

#[derive(Args)]
struct CatalogArgs {
    /// Catalog file (JSON, or YAML by extension)
    #[arg(long)]
    catalog: PathBuf,

    /// Generate only these types (qualified names)
    #[arg(long = "type", value_name = "NAME")]
    types: Vec<String>,

    /// Seed for reproducible UUID literals
    #[arg(long, env = "FIXTUREGEN_SEED")]
    seed: Option<u64>,

    /// Maximum concurrent passes per dependency level
    #[arg(long)]
    workers: Option<usize>,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Output directory
    #[arg(long, env = "FIXTUREGEN_OUT")]
    out: Option<PathBuf>,

    /// Skip the generated-file header comment
    #[arg(long)]
    no_header: bool,

    /// Generate without writing files
    #[arg(long)]
    dry_run: bool,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    init_tracing(&cli.log_level, cli.log_json);

    let mut config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => {
            if let Some(out) = args.out {
                config.out_dir = out;
            }
            if args.no_header {
                config.generation.emit_header = false;
            }
            let report = execute(&args.catalog, &mut config)?;
            if !args.dry_run {
                write_fixtures(&report, &config.out_dir)?;
            }
            finish(&report, cli.output, "generate")
        }
        Commands::Check(args) => {
            let report = execute(&args, &mut config)?;
            finish(&report, cli.output, "check")
        }
    }
}

fn init_tracing(level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.to_string().into());

    // Logs go to stderr; stdout carries only the summary. `try_init` fails
    // when a subscriber is already installed, which is fine.
    let _ = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}

/// Load the catalog, build the engine and run every requested pass.
fn execute(args: &CatalogArgs, config: &mut CliConfig) -> CliResult<RunReport> {
    if let Some(seed) = args.seed {
        config.generation.uuid_seed = Some(seed);
    }
    if let Some(workers) = args.workers {
        config.generation.workers = workers;
    }

    let catalog = catalog::load_catalog(&args.catalog)?;
    let names = if args.types.is_empty() {
        catalog.fixture_targets()
    } else {
        args.types.clone()
    };
    if names.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "{} declares no fixture targets; mark types with \"fixture\": true or pass --type",
            args.catalog.display()
        )));
    }

    let engine = FixtureEngine::with_config(catalog, config.generation.clone())?;
    let requests: Vec<GenerationRequest> = names.into_iter().map(GenerationRequest::new).collect();
    Ok(engine.run(&requests))
}

fn write_fixtures(report: &RunReport, out_dir: &Path) -> CliResult<()> {
    for fixture in report.fixtures() {
        let path = out_dir.join(&fixture.relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &fixture.source)?;
        info!(path = %path.display(), "Wrote fixture");
    }
    Ok(())
}

fn finish(report: &RunReport, format: OutputFormat, verb: &str) -> CliResult<()> {
    output::print_summary(&RunSummary::from_report(report), format, verb)?;
    if report.is_success() {
        Ok(())
    } else {
        warn!(failed = report.failed(), "Some fixture passes failed");
        Err(CliError::Generation {
            failed: report.failed(),
            total: report.outcomes.len(),
        })
    }
}
