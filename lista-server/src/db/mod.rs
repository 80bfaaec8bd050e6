//! Database layer - connection pool and item repository
//!
//! # Design Principles
//!
//! - One pool per process, passed explicitly into handlers via `AppState`
//! - Handlers talk to the `ItemStore` trait, never to the pool directly
//! - Full replace runs in a single transaction

pub mod dsn;
pub mod pool;
pub mod repos;

pub use dsn::{parse_connect_options, DriverDsn, DsnError};
pub use pool::{create_pool, create_pool_with_options, PoolConfig, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
