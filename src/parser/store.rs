//! Loader for transaction store documents.
//!
//! The store is a JSON document holding transactions together with the raw
//! internal call/return events the execution engine recorded for them.

use super::schema::StoreDocument;
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse a store document from a JSON string
///
/// # Errors
/// * `ParseError::JsonError` - Invalid JSON or a field of the wrong shape
pub fn parse_store(raw: &str) -> Result<StoreDocument, ParseError> {
    let document: StoreDocument = serde_json::from_str(raw)?;
    log_document(&document);
    Ok(document)
}

/// Load a store document from a JSON file
///
/// # Errors
/// * `ParseError::IoError` - File cannot be opened
/// * `ParseError::JsonError` - Invalid JSON or a field of the wrong shape
pub fn load_store(path: impl AsRef<Path>) -> Result<StoreDocument, ParseError> {
    let path = path.as_ref();
    debug!("Loading transaction store from: {}", path.display());

    let file = File::open(path)?;
    let document: StoreDocument = serde_json::from_reader(BufReader::new(file))?;
    log_document(&document);
    Ok(document)
}

fn log_document(document: &StoreDocument) {
    debug!("Parsed {} stored transactions", document.transactions.len());

    for tx in &document.transactions {
        // Not fatal here: the builder decides, per transaction, when the
        // trace is actually reconstructed.
        if tx.internal_tx_calls.len() != tx.internal_tx_returns.len() {
            warn!(
                "Transaction {} has {} internal calls but {} returns",
                tx.hash,
                tx.internal_tx_calls.len(),
                tx.internal_tx_returns.len()
            );
        }
    }
}
