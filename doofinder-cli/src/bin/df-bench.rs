use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;
use tracing::{error, info};

use doofinder_cli::args::BenchCli;
use doofinder_cli::bench::{load_queries, run_benchmark, save_results};
use doofinder_cli::telemetry;
use doofinder_repository::DoofinderClient;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let cli = BenchCli::parse();

    if let Err(e) = run(cli).await {
        error!("Benchmark failed: {:#}", e);
        eprintln!("\n{} {}", "Error:".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

async fn run(cli: BenchCli) -> Result<()> {
    let queries = load_queries(&cli.queries_file).await?;
    let client = DoofinderClient::new(cli.service.service_config())
        .context("Invalid service configuration")?;

    let progress = ProgressBar::new(queries.len() as u64).with_message("Running queries");
    let results = run_benchmark(&client, &queries, cli.count, |_| progress.inc(1)).await;
    progress.finish_and_clear();
    let results = results?;

    save_results(&cli.output_file, &results).await?;
    info!(queries = results.len(), output = %cli.output_file.display(), "Benchmark finished");
    println!(
        "{} {} queries, results saved to {}",
        "Done:".green().bold(),
        results.len(),
        cli.output_file.display()
    );

    Ok(())
}
