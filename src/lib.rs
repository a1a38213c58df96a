//! Internal Tx Trace
//!
//! Reconstructs the nested call tree of a transaction's internal calls from
//! the flat, depth-annotated call/return events recorded by an EVM engine,
//! and projects it into:
//! - a nested call stack (`From`, `To`, `Input`, `Output`, `StatusCode`,
//!   `GasLeft`, `Calls`)
//! - the `internalTransactions` field of transaction receipts, one record
//!   per call labeled with its canonical call path (`call_0_1`,
//!   `staticcall_0_0_1`, ...)
//!
//! ## Getting Started
//!
//! ```ignore
//! use internal_tx_trace::receipt::internal_transactions;
//!
//! let records = internal_transactions(&tx.internal_tx_calls, &tx.internal_tx_returns)?;
//! ```
//!
//! Each transaction is reconstructed independently with no shared state, so
//! callers may process transactions concurrently.

pub mod calltree;
pub mod commands;
pub mod output;
pub mod parser;
pub mod receipt;
pub mod utils;
