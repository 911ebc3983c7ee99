mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use marketplace_lib::{FileStore, Session, DEFAULT_BASE_URL};

use crate::output::OutputFormat;

/// Session file used when `MARKETPLACE_STORE` is not set.
const DEFAULT_STORE_PATH: &str = ".marketplace/session.json";

#[derive(Parser)]
#[command(name = "marketplace")]
#[command(about = "Browse city marketplace listings and businesses")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides MARKETPLACE_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse listings in a city
    Listings(commands::listings::ListingsArgs),
    /// Show a single listing
    Listing(commands::listings::ListingArgs),
    /// Browse businesses in a city
    Businesses(commands::businesses::BusinessesArgs),
    /// Show a single business
    Business(commands::businesses::BusinessArgs),
    /// Store an auth token for later requests
    Login(commands::session::LoginArgs),
    /// Forget the stored auth token
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marketplace=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("MARKETPLACE_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let store_path =
        std::env::var("MARKETPLACE_STORE").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
    let session = Session::new(FileStore::open(&store_path)?);
    tracing::debug!("using {} with session store {}", base_url, store_path);

    match &cli.command {
        Commands::Listings(args) => {
            commands::listings::run(args, &session, &base_url, &format).await?
        }
        Commands::Listing(args) => {
            commands::listings::run_one(args, &session, &base_url, &format).await?
        }
        Commands::Businesses(args) => {
            commands::businesses::run(args, &session, &base_url, &format).await?
        }
        Commands::Business(args) => {
            commands::businesses::run_one(args, &session, &base_url, &format).await?
        }
        Commands::Login(args) => commands::session::login(args, &session)?,
        Commands::Logout => commands::session::logout(&session)?,
    }

    Ok(())
}
