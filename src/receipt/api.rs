//! Receipt lookup over a transaction store.
//!
//! `ReceiptApi` serves the two lookups that expose internal transactions:
//! a receipt by transaction hash, and all receipts of a block height. Both
//! produce identical `Receipt` values for the same transaction.

use super::projector::internal_transactions;
use super::schema::Receipt;
use crate::parser::{StoreDocument, StoredTransaction};
use crate::utils::config::TraceLimits;
use crate::utils::error::{ApiError, ParseError};
use alloy_primitives::B256;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

/// Read access to stored transactions
pub trait TxStore {
    fn transaction_by_hash(&self, hash: &B256) -> Option<&StoredTransaction>;

    /// Transactions of a block, in block order
    fn transactions_by_height(&self, height: u64) -> Vec<&StoredTransaction>;
}

/// In-memory transaction store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: Vec<StoredTransaction>,
    by_hash: HashMap<B256, usize>,
    by_height: BTreeMap<u64, Vec<usize>>,
}

impl MemoryStore {
    /// Index a store document
    ///
    /// # Errors
    /// * `ParseError::DuplicateTransaction` - Two transactions share a hash
    pub fn from_document(document: StoreDocument) -> Result<Self, ParseError> {
        let mut store = Self::default();
        for tx in document.transactions {
            store.insert(tx)?;
        }

        let transactions = &store.transactions;
        for block in store.by_height.values_mut() {
            block.sort_by_key(|&i| transactions[i].transaction_index);
        }

        debug!("Indexed {} transactions", store.len());
        Ok(store)
    }

    /// Index one transaction; blocks are put in order by `from_document`
    fn insert(&mut self, tx: StoredTransaction) -> Result<(), ParseError> {
        if self.by_hash.contains_key(&tx.hash) {
            return Err(ParseError::DuplicateTransaction(tx.hash.to_string()));
        }

        let position = self.transactions.len();
        self.by_hash.insert(tx.hash, position);
        self.by_height.entry(tx.block_number).or_default().push(position);
        self.transactions.push(tx);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl TxStore for MemoryStore {
    fn transaction_by_hash(&self, hash: &B256) -> Option<&StoredTransaction> {
        self.by_hash.get(hash).map(|&i| &self.transactions[i])
    }

    fn transactions_by_height(&self, height: u64) -> Vec<&StoredTransaction> {
        self.by_height
            .get(&height)
            .map(|positions| positions.iter().map(|&i| &self.transactions[i]).collect())
            .unwrap_or_default()
    }
}

/// What to do when a transaction's internal trace is malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the request
    #[default]
    Fail,

    /// Return the receipt with an empty `internalTransactions` list
    Degrade,
}

/// Receipt API over a transaction store
#[derive(Debug, Clone)]
pub struct ReceiptApi<S: TxStore> {
    store: S,
    limits: TraceLimits,
    policy: MalformedPolicy,
}

impl<S: TxStore> ReceiptApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            limits: TraceLimits::default(),
            policy: MalformedPolicy::default(),
        }
    }

    pub fn with_limits(mut self, limits: TraceLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Receipt of one transaction, `None` if the hash is unknown
    pub fn get_transaction_receipt(&self, hash: &B256) -> Result<Option<Receipt>, ApiError> {
        debug!("get_transaction_receipt: {}", hash);

        self.store
            .transaction_by_hash(hash)
            .map(|tx| self.build_receipt(tx))
            .transpose()
    }

    /// Receipts of every transaction at a block height, in block order
    pub fn get_tx_list_by_height(&self, height: u64) -> Result<Vec<Receipt>, ApiError> {
        debug!("get_tx_list_by_height: {}", height);

        self.store
            .transactions_by_height(height)
            .into_iter()
            .map(|tx| self.build_receipt(tx))
            .collect()
    }

    fn build_receipt(&self, tx: &StoredTransaction) -> Result<Receipt, ApiError> {
        check_limits(tx, &self.limits)?;

        let internal = match internal_transactions(&tx.internal_tx_calls, &tx.internal_tx_returns)
        {
            Ok(records) => records,
            Err(source) => match self.policy {
                MalformedPolicy::Fail => {
                    return Err(ApiError::Malformed {
                        tx_hash: tx.hash.to_string(),
                        source,
                    })
                }
                MalformedPolicy::Degrade => {
                    warn!(
                        "Dropping internal transactions of {}: {}",
                        tx.hash, source
                    );
                    Vec::new()
                }
            },
        };

        Ok(Receipt {
            transaction_hash: tx.hash,
            transaction_index: tx.transaction_index,
            block_hash: tx.block_hash,
            block_number: tx.block_number,
            from: tx.from,
            to: tx.to,
            cumulative_gas_used: tx.cumulative_gas_used,
            gas_used: tx.gas_used,
            contract_address: tx.contract_address,
            status: tx.status,
            internal_transactions: internal,
        })
    }
}

/// Reject traces over the configured size before reconstructing them
pub fn check_limits(tx: &StoredTransaction, limits: &TraceLimits) -> Result<(), ApiError> {
    let calls = tx.internal_tx_calls.len();
    if calls > limits.max_calls {
        return Err(ApiError::TraceTooLarge {
            tx_hash: tx.hash.to_string(),
            reason: format!("{} internal calls (max {})", calls, limits.max_calls),
        });
    }

    if let Some(depth) = tx.internal_tx_calls.iter().map(|c| c.depth).max() {
        if depth > limits.max_depth {
            return Err(ApiError::TraceTooLarge {
                tx_hash: tx.hash.to_string(),
                reason: format!("call depth {} (max {})", depth, limits.max_depth),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tx(byte: u8, height: u64, index: u64) -> serde_json::Value {
        json!({
            "hash": B256::repeat_byte(byte),
            "blockNumber": height,
            "transactionIndex": index,
            "from": "0x6db26a33492ccc4006599ed88b569c0b13c5d17a",
        })
    }

    #[test]
    fn test_block_order_independent_of_insertion_order() {
        let document: StoreDocument = serde_json::from_value(json!({
            "transactions": [tx(3, 7, 2), tx(1, 7, 0), tx(9, 8, 0), tx(2, 7, 1)]
        }))
        .unwrap();

        let store = MemoryStore::from_document(document).unwrap();
        let indices: Vec<u64> = store
            .transactions_by_height(7)
            .iter()
            .map(|tx| tx.transaction_index)
            .collect();

        assert_eq!(store.len(), 4);
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(store.transactions_by_height(8).len(), 1);
        assert!(store.transactions_by_height(9).is_empty());
    }

    #[test]
    fn test_limits_checked_on_calls_and_depth() {
        let document: StoreDocument = serde_json::from_value(json!({
            "transactions": [{
                "hash": B256::repeat_byte(1),
                "blockNumber": 1,
                "from": "0x6db26a33492ccc4006599ed88b569c0b13c5d17a",
                "internalTxCalls": [
                    { "depth": 0, "kind": "call", "from": "0x6db26a33492ccc4006599ed88b569c0b13c5d17a", "to": "0x6db26a33492ccc4006599ed88b569c0b13c5d17a" },
                    { "depth": 1, "kind": "call", "from": "0x6db26a33492ccc4006599ed88b569c0b13c5d17a", "to": "0x6db26a33492ccc4006599ed88b569c0b13c5d17a" }
                ]
            }]
        }))
        .unwrap();
        let tx = &document.transactions[0];

        assert!(check_limits(tx, &TraceLimits::new(2, 1)).is_ok());
        assert!(matches!(
            check_limits(tx, &TraceLimits::new(1, 1)),
            Err(ApiError::TraceTooLarge { .. })
        ));
        assert!(matches!(
            check_limits(tx, &TraceLimits::new(2, 0)),
            Err(ApiError::TraceTooLarge { .. })
        ));
    }
}
