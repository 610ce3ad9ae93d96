//! Error types for zonescan
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ZoneScanError
pub type Result<T> = std::result::Result<T, ZoneScanError>;

/// Unified error type for zonescan operations
#[derive(Debug, Error)]
pub enum ZoneScanError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Scan Errors
    // -------------------------------------------------------------------------
    #[error("Candidate block {block_index} (position {start_position}) is past the end of the data file")]
    BlockOutOfRange { block_index: u64, start_position: u64 },

    #[error("Scan already closed")]
    ScanClosed,

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Predicate error: {0}")]
    Predicate(String),
}
