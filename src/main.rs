//! # LicenseHub Admin Entry Point
//!
//! `serve` (the default) migrates, seeds the endpoint catalogue and starts the
//! API. `migrate` and `seed` run those steps on their own.

use anyhow::Context;
use clap::{Parser, Subcommand};
use licensehub_admin::{config::ConfigLoader, db, seeds, server::run_server, telemetry};

#[derive(Parser)]
#[command(name = "licensehub-admin")]
#[command(about = "LicenseHub back-office API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run migrations, seed the endpoint catalogue and serve the API
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Seed the endpoint catalogue and demo data, then exit
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config = ConfigLoader::new()
        .load()
        .context("failed to load configuration")?;
    telemetry::init_tracing(&config).context("failed to initialize tracing")?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let db = db::init_pool(&config)
        .await
        .context("failed to connect to the database")?;
    db::run_migrations(&db)
        .await
        .context("failed to run migrations")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            tracing::info!("Migrations applied");
        }
        Command::Seed => {
            seeds::seed_api_endpoints(&db).await?;
            seeds::seed_demo_data(&db).await?;
        }
        Command::Serve => {
            seeds::seed_api_endpoints(&db).await?;
            if config.seed_demo_data {
                seeds::seed_demo_data(&db).await?;
            }
            run_server(config, db).await?;
        }
    }

    Ok(())
}
