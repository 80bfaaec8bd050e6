//! lista CLI - item list server
//!
//! Entry point for the `lista` binary. `lista serve` connects to MySQL and
//! serves the item list over HTTP.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "lista",
    author,
    version,
    about = "Serve a shared item list backed by MySQL"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (/test, /fetch, /post)
    Serve(commands::serve::ServeArgs),
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // A missing .env is fine; the environment may already be set
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    if let Err(err) = run(cli).await {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}
