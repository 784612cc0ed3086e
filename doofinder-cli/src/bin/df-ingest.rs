use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::error;

use doofinder_cli::args::IngestCli;
use doofinder_cli::telemetry;
use doofinder_ingest::catalog::load_catalog;
use doofinder_ingest::{IngestError, IngestEvent, IngestOrchestrator, IngestReport};
use doofinder_repository::DoofinderClient;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Hidden until the import starts; log lines are written around it.
    let progress = ProgressBar::hidden();
    telemetry::init_tracing_with_progress(&progress);

    let cli = IngestCli::parse();

    if let Err(e) = run(cli, progress).await {
        error!("Import failed: {:#}", e);
        eprintln!("\n{} {}", "Error:".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

async fn run(cli: IngestCli, progress: ProgressBar) -> Result<()> {
    let products = load_catalog(&cli.file)
        .await
        .with_context(|| format!("Failed to load products from {}", cli.file.display()))?;

    let client = DoofinderClient::new(cli.service.service_config())
        .context("Invalid service configuration")?;
    let orchestrator = IngestOrchestrator::with_config(Arc::new(client), cli.ingest_config());

    if let Ok(style) =
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} batches {msg}")
    {
        progress.set_style(style);
    }

    let outcome = orchestrator
        .run(products, |event| on_event(&progress, event))
        .await;
    progress.finish_and_clear();

    let report = match outcome {
        Ok(report) => report,
        Err(err) => {
            if let IngestError::IndexReplaceError { report, .. } = &err {
                print_report(report);
                save_report(&cli, report).await?;
            }
            return Err(err.into());
        }
    };

    println!("\n{}", "Import complete!".green().bold());
    print_report(&report);
    save_report(&cli, &report).await?;

    Ok(())
}

fn on_event(progress: &ProgressBar, event: IngestEvent<'_>) {
    match event {
        IngestEvent::Started { products, batches } => {
            progress.set_length(batches as u64);
            progress.set_draw_target(ProgressDrawTarget::stderr());
            progress.set_message(format!("({products} products)"));
        }
        IngestEvent::TemporaryIndexCreated { index } => {
            progress.println(format!("Created temporary index {}", index.bold()));
        }
        IngestEvent::BatchCompleted(p) => {
            progress.set_position(p.batches_done as u64);
            progress.set_message(format!("{} ok, {} failed", p.success_count, p.error_count));
        }
        IngestEvent::ReplacingIndex { temp, target } => {
            progress.println(format!("Replacing {target} with {temp}"));
        }
        IngestEvent::IndexReplaced { target } => {
            progress.println(format!("{} {}", "Index replaced:".green(), target));
        }
        IngestEvent::ReplacementSkipped { temp } => {
            progress.println(format!(
                "{} no products were imported, {} was left in place",
                "Skipping index replacement:".yellow(),
                temp
            ));
        }
    }
}

fn print_report(report: &IngestReport) {
    print!("{}", report.render());
}

async fn save_report(cli: &IngestCli, report: &IngestReport) -> Result<()> {
    if let Some(path) = &cli.report_file {
        report.write_json(path).await?;
        println!("{} {}", "Report saved to:".green(), path.display());
    }
    Ok(())
}
