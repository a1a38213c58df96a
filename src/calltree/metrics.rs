//! Summary statistics over a reconstructed call tree.

use super::node::CallNode;
use crate::utils::config::DEEP_TREE_WARNING_DEPTH;
use log::debug;
use serde::{Deserialize, Serialize};

/// Call tree statistics
///
/// **Public** - returned from calculate_tree_stats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Number of calls, top-level call included
    pub call_count: usize,

    /// Deepest nesting level reached (0 = no nested calls)
    pub max_depth: u32,

    /// Calls that returned a non-zero status
    pub failed_calls: usize,

    /// Read-only calls
    pub static_calls: usize,

    /// Gas used by the top-level call, if entry gas was tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_gas_used: Option<u64>,
}

impl TreeStats {
    /// Check if the tree nests deeper than the warning threshold
    pub fn is_deep(&self) -> bool {
        self.max_depth > DEEP_TREE_WARNING_DEPTH
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        let gas = self
            .total_gas_used
            .map(|g| g.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "Calls: {} | Max depth: {} | Failed: {} | Static: {} | Gas used: {}",
            self.call_count, self.max_depth, self.failed_calls, self.static_calls, gas
        )
    }
}

/// Calculate statistics for a call tree
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `root` - Root of the tree, or `None` for a transaction without calls
pub fn calculate_tree_stats(root: Option<&CallNode>) -> TreeStats {
    let Some(root) = root else {
        return TreeStats::default();
    };

    let mut stats = TreeStats {
        total_gas_used: root.gas_used(),
        ..TreeStats::default()
    };

    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        stats.call_count += 1;
        stats.max_depth = stats.max_depth.max(node.depth);
        if !node.is_success() {
            stats.failed_calls += 1;
        }
        if node.kind.is_read_only() {
            stats.static_calls += 1;
        }
        pending.extend(node.calls.iter());
    }

    debug!("Tree stats: {}", stats.summary());

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calltree::build_call_tree;
    use crate::parser::{CallEvent, CallKind, ReturnEvent};
    use alloy_primitives::{Address, Bytes};

    fn event(depth: u32, kind: CallKind) -> CallEvent {
        CallEvent::new(depth, kind, Address::ZERO, Address::ZERO, Bytes::new())
    }

    #[test]
    fn test_tree_stats() {
        let calls = vec![
            event(0, CallKind::Call).with_gas(10_000),
            event(1, CallKind::StaticCall),
            event(1, CallKind::Call),
            event(2, CallKind::DelegateCall),
        ];
        let returns = vec![
            ReturnEvent::new(Bytes::new(), 0, 0),
            ReturnEvent::new(Bytes::new(), 2, 0),
            ReturnEvent::new(Bytes::new(), 0, 0),
            ReturnEvent::new(Bytes::new(), 0, 7_500),
        ];

        let root = build_call_tree(&calls, &returns).unwrap();
        let stats = calculate_tree_stats(root.as_ref());

        assert_eq!(stats.call_count, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.failed_calls, 1);
        assert_eq!(stats.static_calls, 1);
        assert_eq!(stats.total_gas_used, Some(2_500));
        assert!(!stats.is_deep());
    }

    #[test]
    fn test_tree_stats_empty() {
        let stats = calculate_tree_stats(None);
        assert_eq!(stats, TreeStats::default());
        assert!(stats.summary().contains("Gas used: n/a"));
    }
}
