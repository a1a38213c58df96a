//! Export command implementation.
//!
//! The export command:
//! 1. Loads the transaction store
//! 2. Checks the transaction's trace against the size limits
//! 3. Builds the call tree
//! 4. Labels and projects it
//! 5. Writes the report

use super::models::ExportArgs;
use crate::calltree::{build_call_tree, label_calls};
use crate::output::{to_report, write_report};
use crate::parser::load_store;
use crate::receipt::{check_limits, MemoryStore, TxStore};
use alloy_primitives::B256;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the export command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Store read or parse failures
/// * Unknown transaction hash
/// * Oversized or malformed traces
/// * File write errors
pub fn execute_export(args: ExportArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting export for transaction: {}", args.transaction_hash);

    info!("Step 1/5: Loading transaction store...");
    let store = load_store(&args.store_path)
        .with_context(|| format!("Failed to load store {}", args.store_path.display()))?;
    let store = MemoryStore::from_document(store).context("Failed to index store")?;

    let hash = parse_tx_hash(&args.transaction_hash)?;
    let tx = store
        .transaction_by_hash(&hash)
        .with_context(|| format!("Transaction {} not found in store", hash))?;

    info!("Step 2/5: Checking trace size...");
    check_limits(tx, &args.limits())?;

    info!("Step 3/5: Building call tree...");
    let root = build_call_tree(&tx.internal_tx_calls, &tx.internal_tx_returns)
        .with_context(|| format!("Malformed internal call trace for {}", hash))?;

    if root.is_none() {
        info!("Transaction made no internal calls");
    }

    info!("Step 4/5: Labeling and projecting calls...");
    if let Some(node) = root.as_ref() {
        let labeled = label_calls(node);
        for call in labeled.iter().take(3) {
            debug!("  {} {} -> {}", call.path, call.node.from, call.node.to);
        }
    }
    let report = to_report(hash, tx.block_number, root.as_ref())
        .context("Failed to serialize call stack")?;

    info!("Tree stats: {}", report.stats.summary());
    if report.stats.is_deep() {
        warn!("Call tree is unusually deep ({} levels)", report.stats.max_depth);
    }

    info!("Step 5/5: Writing report...");
    write_report(&report, &args.output_json).context("Failed to write report JSON")?;

    info!("✓ Report written to: {}", args.output_json.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("INTERNAL CALL SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Transaction: {}", report.transaction_hash);
        println!("Block:       {}", report.block_number);
        println!("{}", report.stats.summary());
        println!();
        for record in &report.internal_transactions {
            println!("  {:<24} {} -> {}", record.call_path, record.from, record.to);
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Export completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Parse a transaction hash with or without `0x` prefix
///
/// **Public** - shared by the lookup commands
pub fn parse_tx_hash(raw: &str) -> Result<B256> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);

    if digits.is_empty() {
        anyhow::bail!("Transaction hash cannot be empty");
    }

    if digits.len() != 64 {
        anyhow::bail!("Transaction hash must be 32 bytes (64 hex characters)");
    }

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Transaction hash contains invalid characters");
    }

    digits
        .parse::<B256>()
        .with_context(|| format!("Invalid transaction hash {}", raw))
}

/// Validate export arguments
///
/// **Public** - can be called before execute_export for early validation
pub fn validate_args(args: &ExportArgs) -> Result<()> {
    if args.store_path.as_os_str().is_empty() {
        anyhow::bail!("Store path cannot be empty");
    }

    parse_tx_hash(&args.transaction_hash)?;

    if args.max_calls == 0 {
        anyhow::bail!("max_calls must be greater than 0");
    }

    if args.max_depth == 0 {
        anyhow::bail!("max_depth must be greater than 0");
    }

    Ok(())
}
