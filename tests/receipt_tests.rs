use alloy_primitives::{address, B256};
use internal_tx_trace::parser::parse_store;
use internal_tx_trace::receipt::{MalformedPolicy, MemoryStore, ReceiptApi};
use internal_tx_trace::utils::config::TraceLimits;
use internal_tx_trace::utils::{ApiError, MalformedTrace, ParseError};
use pretty_assertions::assert_eq;

const STORE: &str = include_str!("fixtures/internal_txs.json");
const INTERNAL_TRANSACTIONS: &str = include_str!("fixtures/internal_transactions.json");

fn fixture_api() -> ReceiptApi<MemoryStore> {
    let document = parse_store(STORE).unwrap();
    ReceiptApi::new(MemoryStore::from_document(document).unwrap())
}

#[test]
fn test_receipt_internal_transactions_match_recorded_fixture() {
    let api = fixture_api();
    let receipt = api
        .get_transaction_receipt(&B256::repeat_byte(0xab))
        .unwrap()
        .unwrap();

    let rendered = serde_json::to_string_pretty(&receipt.internal_transactions).unwrap();
    assert_eq!(rendered, INTERNAL_TRANSACTIONS.trim_end());
}

#[test]
fn test_receipt_header_fields() {
    let api = fixture_api();
    let receipt = api
        .get_transaction_receipt(&B256::repeat_byte(0xab))
        .unwrap()
        .unwrap();

    assert_eq!(receipt.block_number, 4);
    assert_eq!(receipt.transaction_index, 0);
    assert_eq!(receipt.gas_used, 0x15abd);
    assert_eq!(receipt.status, 1);
    assert_eq!(
        receipt.to,
        Some(address!("e32d21f68654d87a4aad8c80616db99d95dde0f1"))
    );

    let value = serde_json::to_value(&receipt).unwrap();
    assert_eq!(value["blockNumber"], "0x4");
    assert_eq!(value["gasUsed"], "0x15abd");
    assert_eq!(value["contractAddress"], serde_json::Value::Null);
    assert_eq!(value["internalTransactions"][3]["callPath"], "staticcall_0_0_1");
}

#[test]
fn test_lookup_by_hash_and_height_agree() {
    let api = fixture_api();
    let by_hash = api
        .get_transaction_receipt(&B256::repeat_byte(0xab))
        .unwrap()
        .unwrap();

    let block = api.get_tx_list_by_height(4).unwrap();
    assert_eq!(block.len(), 2);
    assert_eq!(block[0], by_hash);
}

#[test]
fn test_block_receipts_in_index_order() {
    let api = fixture_api();
    let block = api.get_tx_list_by_height(4).unwrap();

    let hashes: Vec<B256> = block.iter().map(|r| r.transaction_hash).collect();
    assert_eq!(
        hashes,
        vec![B256::repeat_byte(0xab), B256::repeat_byte(0xcd)]
    );
    assert!(block[1].internal_transactions.is_empty());
}

#[test]
fn test_transaction_without_calls_renders_empty_list() {
    let api = fixture_api();
    let receipt = api
        .get_transaction_receipt(&B256::repeat_byte(0xcd))
        .unwrap()
        .unwrap();

    let value = serde_json::to_value(&receipt).unwrap();
    assert_eq!(value["internalTransactions"], serde_json::json!([]));
}

#[test]
fn test_unknown_hash_and_height() {
    let api = fixture_api();
    assert!(api
        .get_transaction_receipt(&B256::repeat_byte(0x11))
        .unwrap()
        .is_none());
    assert!(api.get_tx_list_by_height(99).unwrap().is_empty());
}

#[test]
fn test_malformed_trace_fails_by_default() {
    let api = fixture_api();
    let err = api
        .get_transaction_receipt(&B256::repeat_byte(0xef))
        .unwrap_err();

    match err {
        ApiError::Malformed { source, .. } => {
            assert!(matches!(source, MalformedTrace::DepthSkip { .. }))
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(api.get_tx_list_by_height(5).is_err());
}

#[test]
fn test_malformed_trace_degrades_to_empty_list() {
    let api = fixture_api().with_policy(MalformedPolicy::Degrade);
    let receipt = api
        .get_transaction_receipt(&B256::repeat_byte(0xef))
        .unwrap()
        .unwrap();

    assert!(receipt.internal_transactions.is_empty());
    assert_eq!(receipt.block_number, 5);
    assert_eq!(receipt.status, 0);
}

#[test]
fn test_oversized_trace_rejected_before_building() {
    let api = fixture_api().with_limits(TraceLimits::new(3, 1024));
    let err = api
        .get_transaction_receipt(&B256::repeat_byte(0xab))
        .unwrap_err();
    assert!(matches!(err, ApiError::TraceTooLarge { .. }));

    let api = fixture_api().with_limits(TraceLimits::new(100, 1));
    let err = api
        .get_transaction_receipt(&B256::repeat_byte(0xab))
        .unwrap_err();
    assert!(matches!(err, ApiError::TraceTooLarge { .. }));

    // Limits apply even when the degrade policy is active
    let api = fixture_api()
        .with_policy(MalformedPolicy::Degrade)
        .with_limits(TraceLimits::new(3, 1024));
    assert!(api
        .get_transaction_receipt(&B256::repeat_byte(0xab))
        .is_err());
}

#[test]
fn test_duplicate_hash_rejected() {
    let mut document = parse_store(STORE).unwrap();
    let copy = document.transactions[0].clone();
    document.transactions.push(copy);

    assert!(matches!(
        MemoryStore::from_document(document),
        Err(ParseError::DuplicateTransaction(_))
    ));
}
