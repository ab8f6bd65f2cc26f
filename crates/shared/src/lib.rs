//! Shared library for the unmatched-assets reporting tool.
//!
//! This crate provides common functionality used by the binary crate:
//! - Configuration management
//! - Entry and resolved-item models
//! - Output file layout
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
pub use models::*;
pub use paths::OutputPaths;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
