//! Shared utilities, configuration, and error handling for Stampguard
//!
//! This crate provides common functionality used across the Stampguard
//! workspace:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Repository error taxonomy shared by storage-backed crates

pub mod config;
pub mod db;
pub mod error;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
