use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::error;

use doofinder_cli::args::{SearchCli, SearchCommand};
use doofinder_cli::render::{render_search, render_suggestions};
use doofinder_cli::telemetry;
use doofinder_repository::{DoofinderClient, QueryClient};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let cli = SearchCli::parse();

    if let Err(e) = run(cli).await {
        error!("Search failed: {:#}", e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: SearchCli) -> Result<()> {
    let command = cli.command()?;
    let client = DoofinderClient::new(cli.service.service_config())
        .context("Invalid service configuration")?;

    match command {
        SearchCommand::Search(request) => {
            let response = client.search(&request).await?;
            print!("{}", render_search(&response));
        }
        SearchCommand::Suggest(request) => {
            let suggestions = client.suggest(&request).await?;
            print!("{}", render_suggestions(&suggestions));
        }
        SearchCommand::Similar(request) => {
            let response = client.similar_products(&request).await?;
            print!("{}", render_search(&response));
        }
    }

    Ok(())
}
