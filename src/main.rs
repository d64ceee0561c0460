use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hfut_news::config::SiteConfig;
use hfut_news::fetch::{FetcherConfig, HttpFetcher};
use hfut_news::models::ContentFormat;
use hfut_news::NewsClient;

#[derive(Parser)]
#[command(name = "hfut-news")]
#[command(about = "Command-line client for the HFUT campus news portal")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List headlines from a category, newest first
    List {
        /// Category index into the configured category table
        #[arg(long)]
        category: Option<usize>,

        /// Number of items to return (1-100)
        #[arg(long, default_value = "10")]
        count: usize,

        /// Offset into the feed, 0 being the newest item
        #[arg(long, default_value = "0")]
        index: usize,
    },

    /// Fetch one article by its numeric id
    Article {
        /// Article id as it appears in the page URL
        id: u64,

        /// Category index; every category is probed when omitted
        #[arg(long)]
        category: Option<usize>,

        /// Body rendering: "array" or "markdown"
        #[arg(long, default_value = "array")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting hfut-news v{}", env!("CARGO_PKG_VERSION"));

    let config_path = Path::new(&cli.config);
    let config = if config_path.exists() {
        SiteConfig::from_file(config_path)?
    } else {
        tracing::debug!("No config file at {}, using built-in defaults", cli.config);
        SiteConfig::default()
    };

    let fetcher = HttpFetcher::new(FetcherConfig {
        timeout: Duration::from_secs(config.timeout_seconds),
        referer: config.origin.to_string(),
        ..FetcherConfig::default()
    })?;
    let client = NewsClient::new(config, Arc::new(fetcher));

    match cli.command {
        Commands::List {
            category,
            count,
            index,
        } => {
            let items = client.list_news(category, count, index).await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Commands::Article {
            id,
            category,
            format,
        } => {
            let format = match format.as_str() {
                "array" => ContentFormat::Array,
                "markdown" => ContentFormat::Markdown,
                other => {
                    eprintln!("Unknown format: {}. Use 'array' or 'markdown'.", other);
                    return Ok(());
                }
            };
            let article = client.get_article(id, category, format).await?;
            println!("{}", serde_json::to_string_pretty(&article)?);
        }
    }

    Ok(())
}
