//! sheet-sync - batched marketplace sync for spreadsheet workbooks

#![allow(missing_docs)]

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use sheet_sync::core::batch::CompletionNotifier;
use sheet_sync::core::jobs;
use sheet_sync::core::providers::flipkart::fetch_access_token;
use sheet_sync::core::providers::shopify::list_locations;
use sheet_sync::utils::logging::{LogFormat, init_tracing};
use sheet_sync::{Config, WorkbookFile, build_info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "sheet-sync", version = sheet_sync::VERSION, about = sheet_sync::DESCRIPTION)]
struct Cli {
    /// Configuration file
    #[arg(long, short, env = "SHEET_SYNC_CONFIG", default_value = "config/sync.yaml")]
    config: PathBuf,

    /// Workbook file, overriding the configured one
    #[arg(long, short)]
    workbook: Option<PathBuf>,

    /// Log output format: text or json
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up missing FSNs by SKU
    ResolveFsn,
    /// Fetch inventory quantities for FSNs without one
    FetchInventory,
    /// FSN lookup followed by inventory fetch
    FsnAndInventory,
    /// Fetch a Flipkart access token
    Token,
    /// Push inventory and prices of a Shopify store's sheet
    UpdateListings {
        #[arg(long)]
        store: String,
    },
    /// List a Shopify store's locations
    Locations {
        #[arg(long)]
        store: String,
    },
    /// Print the effective configuration with secrets hidden
    ShowConfig,
}

/// Prints the completion message for the operator
struct ConsoleNotifier;

impl CompletionNotifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_format, "info") {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    debug!("sheet-sync {}", build_info());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(&cli.config)
        .await
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;
    if let Some(workbook) = cli.workbook {
        config.workbook = workbook;
    }

    let executor = jobs::executor(&config)?;
    let notifier = Arc::new(ConsoleNotifier);

    match cli.command {
        Command::ResolveFsn => {
            let driver = jobs::fsn_lookup(&config, &executor)?.with_notifier(notifier);
            let mut sheet = open_sheet(&config, &driver.settings().sheet).await?;
            driver.run(&mut sheet).await?;
        }
        Command::FetchInventory => {
            let driver = jobs::inventory_fetch(&config, &executor)?.with_notifier(notifier);
            let mut sheet = open_sheet(&config, &driver.settings().sheet).await?;
            driver.run(&mut sheet).await?;
        }
        Command::FsnAndInventory => {
            let lookup_sheet = config.jobs.fsn_lookup_settings().sheet;
            let fetch_sheet = config.jobs.inventory_fetch_settings().sheet;
            if lookup_sheet != fetch_sheet {
                bail!(
                    "fsn-and-inventory needs both jobs on one sheet, got '{}' and '{}'",
                    lookup_sheet,
                    fetch_sheet
                );
            }
            let mut sheet = open_sheet(&config, &lookup_sheet).await?;
            jobs::fsn_and_inventory(&config, &executor, &mut sheet, notifier.as_ref()).await?;
        }
        Command::Token => {
            let token = fetch_access_token(&executor, &config.flipkart)
                .await
                .context("Failed to fetch Flipkart access token")?;
            println!("{}", token.access_token);
        }
        Command::UpdateListings { store } => {
            let job = jobs::listing_update(&config, &executor, &store)?.with_notifier(notifier);
            let mut sheet = open_sheet(&config, job.sheet_name()).await?;
            job.run(&mut sheet).await?;
        }
        Command::Locations { store } => {
            let store = config.shopify_store(&store)?;
            let locations = list_locations(&executor, store)
                .await
                .with_context(|| format!("Failed to list locations of '{}'", store.name))?;
            for location in locations {
                println!("{}\t{}", location.id, location.name);
            }
        }
        Command::ShowConfig => {
            print!("{}", config.redacted().to_yaml()?);
        }
    }

    Ok(())
}

async fn open_sheet(config: &Config, sheet: &str) -> anyhow::Result<WorkbookFile> {
    WorkbookFile::open(&config.workbook, sheet)
        .await
        .with_context(|| format!("Failed to open {:?}", config.workbook))
}
