//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link registry: shorten, list, lookup
//! - [`services::redirect_service::RedirectService`] - Redirect resolution and click accounting

pub mod services;
