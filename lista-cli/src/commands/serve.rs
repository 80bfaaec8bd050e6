//! HTTP server command
//!
//! Connects to the database, then serves the item list until shutdown.
//! A connection or ping failure at startup is fatal.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use lista_server::db::{create_pool_with_options, PoolConfig, DEFAULT_MAX_CONNECTIONS};
use lista_server::http::{run_server, ServerConfig};
use lista_server::MySqlItemStore;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Database connection string (mysql:// URL or user:pass@tcp(host:port)/db)
    #[arg(long, env = "DSN_LISTA", hide_env_values = true)]
    pub database_url: String,

    /// Address to bind to
    #[arg(long, short = 'b', env = "LISTA_BIND", default_value = "0.0.0.0:4000")]
    pub bind: SocketAddr,

    /// Maximum pooled database connections
    #[arg(long, env = "LISTA_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let pool_config = PoolConfig {
        max_connections: args.max_connections,
    };

    let pool = create_pool_with_options(&args.database_url, &pool_config)
        .await
        .context("Failed to connect to database")?;

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    // Run server (blocks until shutdown)
    run_server(Arc::new(MySqlItemStore::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}
