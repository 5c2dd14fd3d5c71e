//! Schemarules CLI library.
//!
//! This module exposes internal types for testing purposes.
//! The main entry point is the `schemarules` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod request;

// Re-export commonly used types
pub use cli::Args;
pub use error::CliError;
