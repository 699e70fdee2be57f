//! # test-orders CLI
//!
//! Operator console for the test-orders service: drives purge runs, reads
//! and writes gateway settings, and checks service health.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

use test_orders::client::{
    BatchCoordinator, ConsoleProgress, PurgeApiClient, PurgeApiConfig, RunOutcome,
};
use test_orders::logging;
use test_orders::models::order::OrderStatus;
use test_orders::models::settings::GatewaySettings;

#[derive(Parser, Debug)]
#[command(name = "test-orders-cli")]
#[command(about = "Command-line interface for the test-orders service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Base URL of the test-orders service
    #[arg(long, env = "TEST_ORDERS_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Bearer api key, when the server has authentication enabled
    #[arg(long, env = "TEST_ORDERS_API_KEY")]
    api_key: Option<String>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Delete all test orders in batches, with progress
    Purge {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Gateway settings operations
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Check service health
    Health,
}

#[derive(Debug, Subcommand)]
enum SettingsCommands {
    /// Show current gateway settings
    Show,

    /// Update gateway settings
    Set {
        /// Status applied to test orders (pending, processing, on-hold, completed)
        #[arg(long)]
        status: Option<String>,

        /// Whether the gateway reduces stock levels
        #[arg(long)]
        reduce_stock: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        let level = match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        std::env::set_var("RUST_LOG", level);
    }
    logging::init_logging();

    let client = PurgeApiClient::new(PurgeApiConfig {
        base_url: cli.url.clone(),
        api_key: cli.api_key.clone(),
        ..PurgeApiConfig::default()
    })?;

    match cli.command {
        Commands::Purge { yes } => handle_purge(client, yes).await,
        Commands::Settings(command) => handle_settings(client, command).await,
        Commands::Health => handle_health(client).await,
    }
}

async fn handle_purge(client: PurgeApiClient, yes: bool) -> anyhow::Result<()> {
    if !yes && !confirm_purge()? {
        println!("Aborted.");
        return Ok(());
    }

    let coordinator = BatchCoordinator::new(client);
    let mut progress = ConsoleProgress::new();

    match coordinator.run(&mut progress).await {
        RunOutcome::Completed {
            total_deleted,
            total_scanned,
        } => {
            println!("Deleted {total_deleted} of {total_scanned} test orders.");
            Ok(())
        }
        RunOutcome::NoneFound => Ok(()),
        RunOutcome::Failed { message } => Err(anyhow::anyhow!("Purge run failed: {message}")),
    }
}

fn confirm_purge() -> anyhow::Result<bool> {
    print!("This permanently deletes all test orders. Type 'yes' to continue: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("yes"))
}

async fn handle_settings(client: PurgeApiClient, command: SettingsCommands) -> anyhow::Result<()> {
    match command {
        SettingsCommands::Show => {
            let settings = client.settings().await?;
            print_settings(&settings);
        }
        SettingsCommands::Set {
            status,
            reduce_stock,
        } => {
            let mut settings = client.settings().await?;

            if let Some(raw) = status {
                settings.order_status = raw.parse::<OrderStatus>()?;
            }
            if let Some(reduce) = reduce_stock {
                settings.reduce_stock = reduce;
            }

            let saved = client.save_settings(settings).await?;
            println!("Settings saved.");
            print_settings(&saved);
        }
    }
    Ok(())
}

fn print_settings(settings: &GatewaySettings) {
    println!("order status: {}", settings.order_status);
    println!("reduce stock: {}", if settings.reduce_stock { "yes" } else { "no" });
}

async fn handle_health(client: PurgeApiClient) -> anyhow::Result<()> {
    let health = client.health().await?;
    println!("status: {} ({})", health.status, health.timestamp);
    Ok(())
}
