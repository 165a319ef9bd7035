use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use colored::{Color, Colorize};
use config::ConfigError;
use hotelseed_core::{Catalog, CatalogError, Randomizer};
use hotelseed_pipeline::{RunReport, SeedError, SeedOptions, Seeder};
use hotelseed_store::{DocumentStore, MemoryStore, StoreError, SurrealStore};
use log::{error, info};
use thiserror::Error;
use tokio::runtime::{self, Runtime};

use crate::cli::Args;

mod cli;
mod config;
mod logging;

#[derive(Debug, Error)]
enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Could not connect to the store: {0}")]
    Connection(#[from] StoreError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("Fatal error: {0}")]
    Fatal(String),
}

impl AppError {
    fn hint(&self) -> String {
        match self {
            AppError::Config(_) => "Set the HOTELSEED_STORE_* variables in the environment or a .env file, or pass --dry-run.".to_string(),
            AppError::Catalog(_) => "Check that the catalog file exists and is valid JSON with camelCase fields.".to_string(),
            AppError::Connection(_) => "Make sure the SurrealDB instance is running and the credentials are correct, then try again.".to_string(),
            AppError::Seed(SeedError::Catalog(_)) => "Every list in the catalog needs at least one entry.".to_string(),
            AppError::Seed(_) => "The store may now hold a partial seed. Clear it before running again.".to_string(),
            AppError::Fatal(_) => "This error is fatal, and should not happen.".to_string(),
        }
    }
}

fn build_runtime() -> Result<Runtime, AppError> {
    runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("hotelseed-async")
        .build()
        .map_err(|e| AppError::Fatal(e.to_string()))
}

fn seed<S>(
    runtime: &Runtime,
    store: S,
    catalog: Catalog,
    rng: Randomizer,
    options: SeedOptions,
) -> Result<RunReport, AppError>
where
    S: DocumentStore,
{
    let seeder = Seeder::new(Arc::new(store), catalog, rng, options);

    Ok(runtime.block_on(seeder.run())?)
}

fn run(args: Args) -> Result<RunReport, AppError> {
    // Configuration is checked before anything is generated or written
    let store_config = if args.dry_run {
        None
    } else {
        Some(config::store_config()?)
    };

    let catalog = match &args.catalog {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            Catalog::from_json_file(path)?
        }
        None => Catalog::default(),
    };

    let rng = match args.seed {
        Some(seed) => {
            info!("Using random seed {seed}");
            Randomizer::seeded(seed)
        }
        None => Randomizer::from_entropy(),
    };

    let options = args.seed_options();

    info!("Building async runtime...");
    let runtime = build_runtime()?;

    match store_config {
        Some(store_config) => {
            info!(
                "Seeding {}/{}",
                store_config.namespace, store_config.database
            );

            let store = runtime.block_on(SurrealStore::connect(&store_config))?;
            seed(&runtime, store, catalog, rng, options)
        }
        None => {
            info!("Dry run, seeding an in-memory store");
            seed(&runtime, MemoryStore::new(), catalog, rng, options)
        }
    }
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let args = Args::parse();

    if let Err(error) = logging::init_logger(args.verbose) {
        eprintln!("Could not initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(report) => {
            report.log();
            info!("Seeding completed successfully.");

            ExitCode::SUCCESS
        }
        Err(error) => {
            error!(
                "{} Read the error below to troubleshoot the issue.",
                "Seeding failed!".bold().color(Color::Red)
            );
            error!("{}", error);
            error!(
                "{}",
                format!("Hint: {}", error.hint())
                    .color(Color::BrightBlack)
                    .italic()
            );

            ExitCode::FAILURE
        }
    }
}
