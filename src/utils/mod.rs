//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_normalizer`] - URL normalization and validation
//! - [`db_error`] - Unique-violation classification for the Postgres store

pub mod code_generator;
pub mod db_error;
pub mod url_normalizer;
