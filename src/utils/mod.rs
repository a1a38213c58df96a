//! Utility modules for configuration, error handling, and hex rendering.

pub mod config;
pub mod error;
pub mod hex;

// Re-export commonly used error types for convenience
pub use error::{ApiError, MalformedTrace, OutputError, ParseError, PathError};
