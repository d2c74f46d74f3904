//! Core domain + policy logic for the translation relay bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the Gemini API
//! live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod handler;
pub mod logging;
pub mod messaging;
pub mod model;
pub mod policy;
pub mod wire;

pub use errors::{Error, Result};
