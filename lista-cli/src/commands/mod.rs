//! Command implementations for the lista CLI

pub mod serve;

pub use serve::run_serve;
