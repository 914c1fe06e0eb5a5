mod model;
mod parser;
mod server;
mod service;
mod settings;
#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use model::LeagueResponse;
use service::{LeagueService, TOP_N};
use settings::Settings;

#[derive(Parser)]
#[command(name = "livefpl_scraper", about = "LiveFPL league table scraper and JSON API")]
struct Cli {
    /// TOML settings file (FPL_* environment variables take precedence)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve GET /league over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Fetch the league page once and print the JSON envelope
    Scrape {
        /// Only the top 10 rows
        #[arg(long)]
        top: bool,
        /// League page URL (default: configured league_url)
        #[arg(long)]
        url: Option<String>,
    },
    /// Extract records from a saved league page
    Extract {
        path: PathBuf,
        /// Only the top 10 rows
        #[arg(long)]
        top: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            let service = LeagueService::new(&settings).context("Failed to build HTTP client")?;
            server::serve(Arc::new(service), &settings.bind_addr()).await
        }
        Commands::Scrape { top, url } => {
            let service = LeagueService::new(&settings).context("Failed to build HTTP client")?;
            let url = url.unwrap_or_else(|| settings.league_url.clone());
            let result = service.fetch_and_extract(&url, !top).await;
            print_json(&LeagueResponse::from(result))
        }
        Commands::Extract { path, top } => {
            let html = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mut records = parser::extract(&html);
            info!("{} records in {}", records.len(), path.display());
            if top {
                records.truncate(TOP_N);
            }
            print_json(&LeagueResponse::records(records))
        }
    }
}

fn print_json(response: &LeagueResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
