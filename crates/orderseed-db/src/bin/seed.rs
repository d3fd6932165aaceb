//! # seed
//!
//! Drops and reseeds the `customers`, `products`, `stores` and `orders`
//! collections, timing the sample queries after every order batch.
//!
//! ```text
//! seed                                   # defaults, localhost:27017
//! seed --uri mongodb://db:27017 --orders 1000 --batches 2
//! seed --config seed.toml --rng-seed 42 --verify --json
//! RUST_LOG=debug seed                    # per-chunk logging
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orderseed_db::{Database, SeedConfig, Seeder};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Seed MongoDB with synthetic customers, products, stores and orders")]
struct Cli {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// MongoDB connection string
    #[arg(long)]
    uri: Option<String>,

    /// Database name
    #[arg(long)]
    database: Option<String>,

    #[arg(long)]
    customers: Option<usize>,

    #[arg(long)]
    products: Option<usize>,

    #[arg(long)]
    stores: Option<usize>,

    /// Orders generated per batch
    #[arg(long)]
    orders: Option<usize>,

    /// Number of order batches
    #[arg(long)]
    batches: Option<usize>,

    /// Documents per insert_many call
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Seed for reproducible field values
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Check counts and a sample of orders after seeding
    #[arg(long)]
    verify: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(&self, config: &mut SeedConfig) {
        if let Some(uri) = &self.uri {
            config.database.uri = uri.clone();
        }
        if let Some(name) = &self.database {
            config.database.name = name.clone();
        }

        let plan = &mut config.plan;
        for (flag, slot) in [
            (self.customers, &mut plan.customers),
            (self.products, &mut plan.products),
            (self.stores, &mut plan.stores),
            (self.orders, &mut plan.orders_per_batch),
            (self.batches, &mut plan.order_batches),
            (self.chunk_size, &mut plan.insert_chunk_size),
        ] {
            if let Some(value) = flag {
                *slot = value;
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("An error occurred: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SeedConfig::load(cli.config.clone())?;
    cli.apply(&mut config);
    config.validate()?;

    info!(
        database = %config.database.name,
        customers = config.plan.customers,
        products = config.plan.products,
        stores = config.plan.stores,
        orders = config.plan.total_orders(),
        "Starting seed run"
    );

    let db = Database::connect(config.to_db_config()).await?;
    let mut seeder = match cli.rng_seed {
        Some(seed) => Seeder::with_seed(db, config.plan, seed),
        None => Seeder::new(db, config.plan),
    };

    let summary = seeder.run().await?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    if cli.verify {
        let report = seeder.verify().await?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
