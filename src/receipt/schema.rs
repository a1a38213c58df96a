//! Receipt output schema.
//!
//! Field names and hex renderings are an external contract with receipt API
//! clients: quantities are minimal `0x` hex, addresses and byte strings are
//! lowercase `0x` hex.

use crate::utils::hex::{
    deserialize_opt_quantity, deserialize_quantity, deserialize_status, serialize_opt_quantity,
    serialize_quantity, serialize_status,
};
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// One internal call, flattened for the `internalTransactions` receipt field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTxRecord {
    pub call_path: String,

    pub from: Address,

    pub to: Address,

    /// Gas available at entry; omitted when the engine did not track it
    #[serde(
        default,
        serialize_with = "serialize_opt_quantity",
        deserialize_with = "deserialize_opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas: Option<u64>,

    pub value: U256,

    pub input: Bytes,

    #[serde(
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    pub status: u32,

    /// Entry gas minus gas left; omitted when entry gas is unknown
    #[serde(
        default,
        serialize_with = "serialize_opt_quantity",
        deserialize_with = "deserialize_opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_used: Option<u64>,

    pub output: Bytes,
}

/// Transaction receipt as returned by the receipt API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: B256,

    #[serde(
        serialize_with = "serialize_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub transaction_index: u64,

    pub block_hash: B256,

    #[serde(
        serialize_with = "serialize_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub block_number: u64,

    pub from: Address,

    pub to: Option<Address>,

    #[serde(
        serialize_with = "serialize_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub cumulative_gas_used: u64,

    #[serde(
        serialize_with = "serialize_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub gas_used: u64,

    pub contract_address: Option<Address>,

    #[serde(
        serialize_with = "serialize_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub status: u64,

    pub internal_transactions: Vec<InternalTxRecord>,
}
