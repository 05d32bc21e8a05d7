//! Command-line front end for the support triage pipeline
//!
//! `triage run` threads a batch of queries through the pipeline, prints a
//! resolution block per ticket, and persists per-ticket reports, a summary
//! report, and a JSON export. `triage topology` prints the wired graph.
//!
//! Logs go to stderr so `--format json` output stays parseable.

#![deny(unsafe_code)]

pub mod batch;
pub mod error;
pub mod report;
pub mod samples;

use crate::batch::{BatchRunner, BatchSummary, QueryInput};
use crate::error::{CliError, CliResult};
use crate::report::OutputFormat;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use triage_agents::support_pipeline;
use triage_directory::{DataProvider, InMemoryProvider};

#[derive(Parser)]
#[command(name = "triage", about = "Support-desk triage over a staged decision graph", version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a batch of support queries
    Run {
        /// JSON file of {subject_id, query} inputs; built-in demo batch when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Folder the reports and the JSON export are written to
        #[arg(short, long, default_value = "ticket_results")]
        output: PathBuf,

        /// Console output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Print the pipeline topology
    Topology,
}

pub fn run() -> CliResult<()> {
    run_with_args(std::env::args())
}

pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Run {
            input,
            output,
            format,
        } => run_batch(input.as_deref(), &output, format),
        Commands::Topology => show_topology(),
    }
}

fn run_batch(input: Option<&Path>, output: &Path, format: OutputFormat) -> CliResult<()> {
    let inputs = read_inputs(input)?;
    if inputs.is_empty() {
        return Err(CliError::InvalidInput("no queries to process".into()));
    }

    let provider: Arc<dyn DataProvider> = Arc::new(InMemoryProvider::with_demo_data());
    let graph = support_pipeline(Arc::clone(&provider))?;
    let mut runner = BatchRunner::new(&graph);
    let batch_report = runner.run_all(&inputs);
    let summary = BatchSummary::from_report(&batch_report);

    match format {
        OutputFormat::Table => {
            for outcome in &batch_report.runs {
                report::print_outcome(outcome);
            }
            report::print_summary(&summary);
            let (folder, timestamp) =
                report::write_artifacts(&batch_report, &summary, provider.as_ref(), output)?;
            report::print_saved(&folder, &timestamp, summary.total - summary.failed);
        }
        OutputFormat::Json => {
            report::write_artifacts(&batch_report, &summary, provider.as_ref(), output)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn read_inputs(path: Option<&Path>) -> CliResult<Vec<QueryInput>> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(file)?)
        }
        None => Ok(samples::demo_batch()),
    }
}

fn show_topology() -> CliResult<()> {
    let provider: Arc<dyn DataProvider> = Arc::new(InMemoryProvider::new());
    let graph = support_pipeline(provider)?;

    println!("{}", "PIPELINE TOPOLOGY".bold().cyan());
    println!("{}", "=".repeat(70).dimmed());

    if let Some(entry) = graph.entry() {
        println!("Entry: {}", entry.to_string().bold());
    }

    let mut stages: Vec<_> = graph.stage_keys().collect();
    stages.sort();
    println!("\n{}", "Stages:".bold());
    for stage in stages {
        if graph.is_terminal(stage) {
            println!("  {} {}", stage, "(terminal)".dimmed());
        } else {
            println!("  {stage}");
        }
    }

    let mut edges: Vec<_> = graph.edges().collect();
    edges.sort();
    println!("\n{}", "Edges:".bold());
    for (from, to) in edges {
        println!("  {from} → {to}");
    }

    let mut branches: Vec<_> = graph.branch_points().collect();
    branches.sort_by_key(|(from, _)| *from);
    println!("\n{}", "Branch points:".bold());
    for (from, branch) in branches {
        let mut targets: Vec<_> = branch.targets().iter().collect();
        targets.sort();
        for (outcome, to) in targets {
            println!("  {from} ({outcome}) → {to}");
        }
    }
    Ok(())
}
