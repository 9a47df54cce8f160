use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use trivia_api::config::get_configuration;
use trivia_api::db::{self, run_migrations};
use trivia_api::server::{run_server, AppState};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(default_value = "serve")]
    runner: Runner,
    /// Directory containing base.toml
    #[clap(long, default_value = "configuration")]
    config_dir: PathBuf,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Runner {
    /// Apply migrations, then serve the API
    Serve,
    /// Apply migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    let settings = get_configuration(&cli.config_dir).context("Failed to read configuration")?;
    let pool = db::establish_connection(&settings.database)
        .await
        .context("Cannot connect to DB")?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await.context("Migrations failed")?;

    match cli.runner {
        Runner::Migrate => tracing::info!("Migrations applied"),
        Runner::Serve => {
            let state = AppState {
                pool,
                quiz: settings.quiz.strategy,
            };
            run_server(state, &settings.application.address()).await?
        }
    }
    Ok(())
}
