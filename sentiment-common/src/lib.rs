//! # Sentiment Dashboard Common Library
//!
//! Shared code for the sentiment dashboard crates:
//! - Error type used during bootstrap
//! - TOML bootstrap configuration and credential resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
