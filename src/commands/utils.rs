use super::export::parse_tx_hash;
use super::models::LookupArgs;
use crate::calltree::{build_call_tree, call_stack_to_string};
use crate::output::{check_report, read_report, to_pretty_json};
use crate::parser::load_store;
use crate::receipt::{check_limits, MemoryStore, ReceiptApi, TxStore};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

fn open_api(args: &LookupArgs) -> Result<ReceiptApi<MemoryStore>> {
    let document = load_store(&args.store_path)
        .with_context(|| format!("Failed to load store {}", args.store_path.display()))?;
    let store = MemoryStore::from_document(document).context("Failed to index store")?;
    Ok(ReceiptApi::new(store)
        .with_policy(args.policy())
        .with_limits(args.limits()))
}

/// Print the nested call stack of a transaction
pub fn print_call_stack(args: &LookupArgs, tx_hash: &str) -> Result<()> {
    let hash = parse_tx_hash(tx_hash)?;
    let api = open_api(args)?;
    let tx = api
        .store()
        .transaction_by_hash(&hash)
        .with_context(|| format!("Transaction {} not found in store", hash))?;

    check_limits(tx, &args.limits())?;

    match build_call_tree(&tx.internal_tx_calls, &tx.internal_tx_returns)? {
        Some(root) => println!("{}", call_stack_to_string(&root)?),
        None => println!("null"),
    }

    Ok(())
}

/// Print the receipt of a transaction
pub fn print_receipt(args: &LookupArgs, tx_hash: &str) -> Result<()> {
    let hash = parse_tx_hash(tx_hash)?;
    let receipt = open_api(args)?
        .get_transaction_receipt(&hash)?
        .with_context(|| format!("Transaction {} not found in store", hash))?;

    println!("{}", to_pretty_json(&receipt)?);
    Ok(())
}

/// Print the receipts of every transaction at a height
pub fn print_block_receipts(args: &LookupArgs, height: u64) -> Result<()> {
    let receipts = open_api(args)?.get_tx_list_by_height(height)?;
    println!("{}", to_pretty_json(&receipts)?);
    Ok(())
}

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;
    check_report(&report).context("Report call paths are inconsistent")?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Transaction: {}", report.transaction_hash);
    println!("  Block: {}", report.block_number);
    println!("  Internal Calls: {}", report.stats.call_count);
    println!("  Max Depth: {}", report.stats.max_depth);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Internal Tx Trace Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string               - Schema version (e.g., '1.0.0')");
        println!("  transaction_hash: string      - Transaction hash");
        println!("  block_number: number          - Block height");
        println!("  stats: object                 - Call tree statistics");
        println!("    call_count: number          - Internal calls, top-level included");
        println!("    max_depth: number           - Deepest nesting level");
        println!("    failed_calls: number        - Calls with non-zero status");
        println!("    static_calls: number        - Read-only calls");
        println!("    total_gas_used: number?     - Gas used by the top-level call");
        println!("  call_stack: object?           - Nested From/To/Input/Output/StatusCode/GasLeft/Calls");
        println!("  internal_transactions: array  - Flattened receipt records");
        println!("    callPath: string            - e.g. call_0_1, staticcall_0_0_1");
        println!("    from, to: string            - 0x addresses");
        println!("    gas, gasUsed: string?       - 0x quantities (if entry gas tracked)");
        println!("    value, status: string       - 0x quantities");
        println!("    input, output: string       - 0x byte strings");
        println!("  generated_at: string          - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Internal Tx Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Reconstructs internal call trees of EVM transactions and projects them into receipts.");
}
