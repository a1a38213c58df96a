//! Receipt projection and lookup.
//!
//! This module handles:
//! - Flattening labeled call trees into `internalTransactions` records
//! - Receipt schema
//! - Receipt lookup by hash and by block height

pub mod api;
pub mod projector;
pub mod schema;

// Re-export main types
pub use api::{check_limits, MalformedPolicy, MemoryStore, ReceiptApi, TxStore};
pub use projector::{internal_transactions, project};
pub use schema::{InternalTxRecord, Receipt};
