//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// A transaction trace whose call and return events cannot form a call tree.
///
/// Reconstruction aborts on any of these; no partial tree is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTrace {
    #[error("first call is at depth {depth}, expected 0")]
    RootDepth { depth: u32 },

    #[error("call {index} at depth {depth} skips levels (open call is at depth {open_depth})")]
    DepthSkip {
        index: usize,
        depth: u32,
        open_depth: u32,
    },

    #[error("call {index} at depth {depth} would open a second top-level call")]
    SecondRoot { index: usize, depth: u32 },

    #[error("return queue exhausted with {open} call(s) still open")]
    ReturnsExhausted { open: usize },

    #[error("{remaining} return event(s) left unconsumed")]
    UnconsumedReturns { remaining: usize },
}

/// Errors that can occur while parsing a transaction store
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to read store: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Duplicate transaction hash: {0}")]
    DuplicateTransaction(String),
}

/// Errors that can occur while parsing or regrouping call paths
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Invalid call path: {0}")]
    InvalidPath(String),

    #[error("Call path {path} does not follow its predecessor in pre-order")]
    OutOfOrder { path: String },

    #[error("Call paths disagree with the report: {0}")]
    Inconsistent(String),
}

/// Errors surfaced by the receipt API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed internal call trace for {tx_hash}: {source}")]
    Malformed {
        tx_hash: String,
        #[source]
        source: MalformedTrace,
    },

    #[error("Trace of {tx_hash} too large: {reason}")]
    TraceTooLarge { tx_hash: String, reason: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
