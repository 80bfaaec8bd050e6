//! lista-server: item list storage over HTTP
//!
//! Serves a single list of items backed by the MySQL `items` table.
//! `GET /fetch` returns the whole list and `POST /post` replaces it.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, ItemStore, MemoryItemStore, MySqlItemStore};
pub use http::{run_server, ServerConfig};
pub use models::Item;
