//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click accounting event model
//! - [`click_worker`] - Asynchronous click counter worker
//!
//! # Click Processing Flow
//!
//! 1. Redirect handler resolves a short code
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] applies an atomic increment per event

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
