//! Trace report: both output shapes of one transaction in a single file.

use crate::calltree::{calculate_tree_stats, nest_paths, CallNode, CallPath, PathNode, TreeStats};
use crate::receipt::{project, InternalTxRecord};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::PathError;
use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceReport {
    /// Schema version for compatibility checking
    pub version: String,

    pub transaction_hash: B256,

    pub block_number: u64,

    pub stats: TreeStats,

    /// Nested call stack, `null` when the transaction made no calls
    pub call_stack: serde_json::Value,

    /// Flattened records, as in the receipt's `internalTransactions`
    pub internal_transactions: Vec<InternalTxRecord>,

    /// Timestamp when report was generated
    pub generated_at: String,
}

/// Assemble a report from a reconstructed tree
///
/// **Public** - used by the export command
pub fn to_report(
    transaction_hash: B256,
    block_number: u64,
    root: Option<&CallNode>,
) -> Result<TraceReport, serde_json::Error> {
    use chrono::Utc;

    let call_stack = match root {
        Some(node) => serde_json::to_value(node)?,
        None => serde_json::Value::Null,
    };

    Ok(TraceReport {
        version: SCHEMA_VERSION.to_string(),
        transaction_hash,
        block_number,
        stats: calculate_tree_stats(root),
        call_stack,
        internal_transactions: root.map(project).unwrap_or_default(),
        generated_at: Utc::now().to_rfc3339(),
    })
}

/// Check that a report's call paths regroup into a tree matching its stats
/// and its nested call stack
///
/// # Errors
/// * `PathError::InvalidPath` / `PathError::OutOfOrder` - Bad path list
/// * `PathError::Inconsistent` - Paths, stats and call stack disagree
pub fn check_report(report: &TraceReport) -> Result<Option<PathNode>, PathError> {
    let paths = report
        .internal_transactions
        .iter()
        .map(|record| record.call_path.parse::<CallPath>())
        .collect::<Result<Vec<_>, _>>()?;

    let nested = nest_paths(&paths)?;

    if paths.len() != report.stats.call_count {
        return Err(PathError::Inconsistent(format!(
            "{} records but {} calls in stats",
            paths.len(),
            report.stats.call_count
        )));
    }

    let max_depth = paths.iter().map(CallPath::depth).max().unwrap_or(0);
    if max_depth != report.stats.max_depth as usize {
        return Err(PathError::Inconsistent(format!(
            "paths reach depth {} but stats say {}",
            max_depth, report.stats.max_depth
        )));
    }

    let stack_calls = count_stack_calls(&report.call_stack);
    if stack_calls != paths.len() {
        return Err(PathError::Inconsistent(format!(
            "call stack holds {} calls but {} records",
            stack_calls,
            paths.len()
        )));
    }

    Ok(nested)
}

/// Count calls in a nested call-stack JSON value
fn count_stack_calls(stack: &serde_json::Value) -> usize {
    let mut count = 0;
    let mut pending = vec![stack];
    while let Some(node) = pending.pop() {
        if node.is_null() {
            continue;
        }
        count += 1;
        if let Some(calls) = node.get("Calls").and_then(|c| c.as_array()) {
            pending.extend(calls.iter());
        }
    }
    count
}
