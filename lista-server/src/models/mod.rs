//! Domain models
//!
//! The item is the only entity. Identifiers come from the client and are
//! carried through unchanged.

pub mod item;

pub use item::Item;
