//! Input schema for execution-engine trace events and stored transactions.
//!
//! A transaction's internal calls arrive as two flat sequences in execution
//! order: call-enter events (`internalTxCalls`) and call-return events
//! (`internalTxReturns`). Returns carry no id; they are matched to calls by
//! completion order.

use crate::utils::hex::{deserialize_opt_quantity, deserialize_quantity, deserialize_status};
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Call-kind tag supplied by the execution engine for each call.
///
/// This is the EVMC call-kind set. Only `StaticCall` forbids state
/// mutation in the callee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    #[serde(alias = "CALL")]
    Call,
    #[serde(alias = "STATICCALL")]
    StaticCall,
    #[serde(alias = "DELEGATECALL")]
    DelegateCall,
    #[serde(alias = "CALLCODE")]
    CallCode,
    #[serde(alias = "CREATE")]
    Create,
    #[serde(alias = "CREATE2")]
    Create2,
}

impl CallKind {
    pub fn is_read_only(self) -> bool {
        self == CallKind::StaticCall
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallKind::Call => "call",
            CallKind::StaticCall => "staticcall",
            CallKind::DelegateCall => "delegatecall",
            CallKind::CallCode => "callcode",
            CallKind::Create => "create",
            CallKind::Create2 => "create2",
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call-enter event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEvent {
    /// Nesting level, 0 for the transaction's top-level call
    pub depth: u32,

    pub kind: CallKind,

    #[serde(alias = "sender")]
    pub from: Address,

    #[serde(alias = "destination")]
    pub to: Address,

    #[serde(default)]
    pub input: Bytes,

    /// Gas available at entry, if the engine tracks it
    #[serde(
        default,
        deserialize_with = "deserialize_opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas: Option<u64>,

    #[serde(default)]
    pub value: U256,
}

impl CallEvent {
    pub fn new(depth: u32, kind: CallKind, from: Address, to: Address, input: Bytes) -> Self {
        Self {
            depth,
            kind,
            from,
            to,
            input,
            gas: None,
            value: U256::ZERO,
        }
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// A call-return event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnEvent {
    #[serde(default)]
    pub output: Bytes,

    /// 0 = success, anything else is a failure
    #[serde(default, alias = "status", alias = "status_code", deserialize_with = "deserialize_status")]
    pub status_code: u32,

    /// Gas remaining when the call returned
    #[serde(alias = "gas_left", deserialize_with = "deserialize_quantity")]
    pub gas_left: u64,
}

impl ReturnEvent {
    pub fn new(output: Bytes, status_code: u32, gas_left: u64) -> Self {
        Self {
            output,
            status_code,
            gas_left,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 0
    }
}

/// A transaction as kept by the node's store, with its raw internal trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTransaction {
    pub hash: B256,

    #[serde(alias = "block_number", deserialize_with = "deserialize_quantity")]
    pub block_number: u64,

    #[serde(default, alias = "block_hash")]
    pub block_hash: B256,

    #[serde(default, alias = "transaction_index", deserialize_with = "deserialize_quantity")]
    pub transaction_index: u64,

    pub from: Address,

    #[serde(default)]
    pub to: Option<Address>,

    #[serde(default, alias = "gas_used", deserialize_with = "deserialize_quantity")]
    pub gas_used: u64,

    #[serde(
        default,
        alias = "cumulative_gas_used",
        deserialize_with = "deserialize_quantity"
    )]
    pub cumulative_gas_used: u64,

    /// Receipt status: 1 = success, 0 = failure
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub status: u64,

    #[serde(default, alias = "contract_address")]
    pub contract_address: Option<Address>,

    #[serde(default, alias = "internal_tx_calls")]
    pub internal_tx_calls: Vec<CallEvent>,

    #[serde(default, alias = "internal_tx_returns")]
    pub internal_tx_returns: Vec<ReturnEvent>,
}

/// Top-level store document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub transactions: Vec<StoredTransaction>,
}
