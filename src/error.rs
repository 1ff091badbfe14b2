//! Error types for scopekit
//!
//! Scenario failures are recorded as data on the outcome tree, not as
//! errors. This type covers the fallible edges around them.

use thiserror::Error;

/// Result type alias using ShowcaseError
pub type Result<T> = std::result::Result<T, ShowcaseError>;

/// Unified error type for scopekit operations
#[derive(Debug, Error)]
pub enum ShowcaseError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Scenario Errors
    // -------------------------------------------------------------------------
    #[error("Scenario failed: {0}")]
    Scenario(String),
}
