//! Presentation and persistence of batch results
//!
//! Console blocks for humans, text reports and a JSON export on disk for
//! everyone else. Artifacts from one batch share a filename timestamp so
//! they sort together.

use crate::batch::{BatchReport, BatchSummary, FailedRun, RunOutcome};
use crate::error::CliResult;
use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use colored::Colorize;
use flow_engine::FlowRun;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use triage_core::{Intent, Priority, TicketRecord};
use triage_directory::DataProvider;

/// Console format for the batch summary
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable, colored
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

/// One completed run, flattened for the JSON export
#[derive(Debug, Serialize)]
pub struct TicketExport {
    pub ticket_id: String,
    pub subject_id: String,
    pub subject_name: String,
    pub query: String,
    pub intent: Option<Intent>,
    pub priority: Option<Priority>,
    pub quality_score: f64,
    pub escalated: bool,
    pub audit: Vec<String>,
    pub final_response: String,
    pub exported_at: DateTime<Utc>,
}

impl TicketExport {
    fn from_run(
        run: &FlowRun<TicketRecord>,
        provider: &dyn DataProvider,
        exported_at: DateTime<Utc>,
    ) -> Self {
        let record = &run.state;
        Self {
            ticket_id: record.id().to_string(),
            subject_id: record.subject().to_string(),
            subject_name: provider.lookup_subject(record.subject()).name,
            query: record.query().to_owned(),
            intent: record.classification(),
            priority: record.priority(),
            quality_score: record.quality().unwrap_or(0.0),
            escalated: record.escalated().unwrap_or(false),
            audit: record.audit().entries().to_vec(),
            final_response: record.final_response().unwrap_or("").to_owned(),
            exported_at,
        }
    }
}

// ── Console output ───────────────────────────────────────────────────

/// Print the detail block for one batch entry
pub fn print_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Completed(run) => print_run(run),
        RunOutcome::Failed(failed) => print_failed(failed),
    }
}

fn print_run(run: &FlowRun<TicketRecord>) {
    let record = &run.state;
    let bar = "=".repeat(80);
    let rule = "-".repeat(80);

    println!("\n{}", bar.dimmed());
    println!("{} {}", "TICKET ID:".bold(), record.id().to_string().bold().cyan());
    println!("{} {}", "CUSTOMER:".bold(), record.subject());
    println!("{}", bar.dimmed());
    println!("\n{}", "CUSTOMER QUERY:".bold());
    println!("{}", record.query());
    println!("\n{}", rule.dimmed());
    println!("\n{}", "RESOLUTION FLOW:".bold());
    for note in record.audit() {
        println!("  • {}", note.dimmed());
    }
    println!("\n{}", rule.dimmed());
    println!("{}", "FINAL RESPONSE:".bold());
    println!("{}", record.final_response().unwrap_or(""));
    println!("{}\n", bar.dimmed());
}

fn print_failed(failed: &FailedRun) {
    let record = &failed.record;
    let bar = "=".repeat(80);

    println!("\n{}", bar.dimmed());
    println!(
        "{} {} {}",
        "TICKET ID:".bold(),
        record.id().to_string().bold().cyan(),
        "FAILED".bold().red()
    );
    println!("{} {}", "CUSTOMER:".bold(), record.subject());
    println!("{} {}", "ERROR:".bold(), failed.error.to_string().red());
    println!("{}\n", bar.dimmed());
}

/// Print the aggregate statistics block
pub fn print_summary(summary: &BatchSummary) {
    let bar = "=".repeat(80);

    println!("\n{}", bar.dimmed());
    println!("{}", "SUMMARY STATISTICS".bold().cyan());
    println!("{}", bar.dimmed());
    println!("Total tickets processed: {}", summary.total);
    println!("Escalated to human review: {}", summary.escalated);
    println!("Auto-resolved: {}", summary.auto_resolved);
    if summary.failed > 0 {
        println!("{}", format!("Failed: {}", summary.failed).red());
    } else {
        println!("Failed: 0");
    }
    println!("\n{}", "Intent Distribution:".bold());
    for (intent, count) in &summary.intent_counts {
        println!("  • {intent}: {count}");
    }
    println!("\nAverage Quality Score: {:.2}", summary.average_quality);
}

/// Print where the artifacts of this batch went
pub fn print_saved(folder: &Path, timestamp: &str, ticket_count: usize) {
    let bar = "=".repeat(80);

    println!("\n{}", bar.dimmed());
    println!("{}", "SAVING RESULTS TO FILES".bold().cyan());
    println!("{}", bar.dimmed());
    println!("{} Results saved to folder: {}/", "✓".green(), folder.display());
    println!("{} Individual ticket reports: {} files", "✓".green(), ticket_count);
    println!("{} Summary report: SUMMARY_{}.txt", "✓".green(), timestamp);
    println!("{} JSON data file: tickets_data_{}.json", "✓".green(), timestamp);
    println!("{}", bar.dimmed());
}

// ── File artifacts ───────────────────────────────────────────────────

/// Write per-ticket reports, the summary report, and the JSON export.
/// Returns the output folder and the shared filename timestamp.
pub fn write_artifacts(
    report: &BatchReport,
    summary: &BatchSummary,
    provider: &dyn DataProvider,
    out_dir: &Path,
) -> CliResult<(PathBuf, String)> {
    fs::create_dir_all(out_dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    for run in report.completed() {
        let path = out_dir.join(format!("{}_{}.txt", run.state.id(), timestamp));
        fs::write(path, ticket_report(run, provider))?;
    }

    let summary_path = out_dir.join(format!("SUMMARY_{timestamp}.txt"));
    fs::write(summary_path, summary_report(report, summary, provider))?;

    let exported_at = Utc::now();
    let exports: Vec<TicketExport> = report
        .completed()
        .map(|run| TicketExport::from_run(run, provider, exported_at))
        .collect();
    let json_path = out_dir.join(format!("tickets_data_{timestamp}.json"));
    fs::write(json_path, serde_json::to_string_pretty(&exports)?)?;

    Ok((out_dir.to_path_buf(), timestamp))
}

/// The detail report for one completed run
pub fn ticket_report(run: &FlowRun<TicketRecord>, provider: &dyn DataProvider) -> String {
    let record = &run.state;
    let bar = "=".repeat(80);
    let subject = provider.lookup_subject(record.subject());
    let date = run.finished_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");

    let mut text = format!(
        "CUSTOMER SUPPORT TICKET REPORT\n\
         {bar}\n\
         Ticket ID: {id}\n\
         Customer ID: {subject_id}\n\
         Customer Name: {name}\n\
         Date: {date}\n\
         {bar}\n\n\
         CUSTOMER QUERY:\n\
         {query}\n\n\
         {bar}\n\
         TICKET CLASSIFICATION:\n\
         Intent: {intent}\n\
         Priority: {priority}\n\
         Quality Score: {score:.2}\n\
         Escalated: {escalated}\n\n\
         {bar}\n\
         RESOLUTION FLOW:\n",
        id = record.id(),
        subject_id = record.subject(),
        name = subject.name,
        query = record.query(),
        intent = record.classification().map(|i| i.as_str()).unwrap_or("unknown"),
        priority = record.priority().map(|p| p.as_str()).unwrap_or("unknown"),
        score = record.quality().unwrap_or(0.0),
        escalated = if record.escalated().unwrap_or(false) { "Yes" } else { "No" },
    );

    for note in record.audit() {
        text.push_str("  • ");
        text.push_str(note);
        text.push('\n');
    }

    text.push_str(&format!(
        "\n{bar}\nFINAL RESPONSE:\n{response}\n\n{bar}\n",
        response = record.final_response().unwrap_or(""),
    ));
    text
}

/// The aggregate report covering the whole batch
pub fn summary_report(
    report: &BatchReport,
    summary: &BatchSummary,
    provider: &dyn DataProvider,
) -> String {
    let bar = "=".repeat(80);

    let mut text = format!(
        "CUSTOMER SUPPORT SUMMARY REPORT\n\
         {bar}\n\
         Generated: {now}\n\
         {bar}\n\n\
         STATISTICS:\n\
         Total tickets processed: {total}\n\
         Escalated to human review: {escalated}\n\
         Auto-resolved: {auto}\n\
         Failed: {failed}\n\n\
         INTENT DISTRIBUTION:\n",
        now = Local::now().format("%Y-%m-%d %H:%M:%S"),
        total = summary.total,
        escalated = summary.escalated,
        auto = summary.auto_resolved,
        failed = summary.failed,
    );

    for (intent, count) in &summary.intent_counts {
        text.push_str(&format!("  • {intent}: {count}\n"));
    }
    text.push_str(&format!(
        "\nAVERAGE QUALITY SCORE: {:.2}\n\n",
        summary.average_quality
    ));
    text.push_str(&format!("{bar}\nTICKET DETAILS:\n{bar}\n\n"));

    for outcome in &report.runs {
        let record = outcome.record();
        let subject = provider.lookup_subject(record.subject());
        let status = match outcome {
            RunOutcome::Completed(_) => {
                if record.escalated().unwrap_or(false) { "Escalated: Yes" } else { "Escalated: No" }
            }
            RunOutcome::Failed(_) => "FAILED",
        };
        text.push_str(&format!(
            "\nTicket: {id}\n\
             Customer: {name} ({subject_id})\n\
             Intent: {intent} | Priority: {priority} | {status}\n\
             Query: {query}\n\
             ---\n",
            id = record.id(),
            name = subject.name,
            subject_id = record.subject(),
            intent = record.classification().map(|i| i.as_str()).unwrap_or("unknown"),
            priority = record.priority().map(|p| p.as_str()).unwrap_or("unknown"),
            query = truncate(record.query(), 100),
        ));
    }
    text
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_owned()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    }
}
