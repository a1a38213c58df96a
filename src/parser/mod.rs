//! Trace event parsing and input schema definitions.
//!
//! This module handles:
//! - Call/return event types produced by the execution engine
//! - Stored transaction records
//! - Loading transaction store documents

pub mod schema;
pub mod store;

// Re-export main types
pub use schema::{CallEvent, CallKind, ReturnEvent, StoreDocument, StoredTransaction};
pub use store::{load_store, parse_store};
