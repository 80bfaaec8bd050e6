//! Database connection pool management
//!
//! Uses sqlx MySqlPool with explicit connection limits. The pool is pinged
//! once before it is handed out; callers treat any error here as fatal.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::{Connection, MySqlPool};

use super::dsn::parse_connect_options;
use super::repos::DbError;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Pool settings
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Create a MySQL connection pool.
///
/// # Arguments
///
/// * `database_url` - `mysql://` URL or driver DSN (`user:pw@tcp(host:port)/db`)
///
/// # Errors
///
/// Returns an error if the connection string is malformed, the connection
/// fails, or the ping fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("lista:secret@tcp(localhost:3306)/lista").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<MySqlPool, DbError> {
    create_pool_with_options(database_url, &PoolConfig::default()).await
}

/// Create a MySQL connection pool with custom options.
pub async fn create_pool_with_options(
    database_url: &str,
    config: &PoolConfig,
) -> Result<MySqlPool, DbError> {
    let options = parse_connect_options(database_url)?;

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    pool.acquire().await?.ping().await?;

    tracing::info!(
        max_connections = config.max_connections,
        "connected to database"
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DSN_LISTA=... cargo test -p lista-server -- --ignored

    #[test]
    fn default_config() {
        assert_eq!(PoolConfig::default().max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[tokio::test]
    async fn malformed_dsn_fails_before_connecting() {
        let err = create_pool("no-separator-here").await.unwrap_err();
        assert!(matches!(err, DbError::Dsn(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DSN_LISTA").expect("DSN_LISTA required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let result: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }
}
