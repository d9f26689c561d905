//! Core domain entities.
//!
//! Entities are plain data structures. Creation input lives in a separate
//! `NewLink` struct because ids, counters and timestamps belong to the store.

pub mod link;

pub use link::{Link, LinkCatalog, NewLink};
