//! Reconstruction of internal call trees.
//!
//! This module transforms a transaction's flat call/return events into:
//! - A nested call tree (stack-based builder)
//! - Canonical call paths for every call (pre-order labeler)
//! - Tree statistics

pub mod labeler;
pub mod metrics;
pub mod node;
pub mod stack_builder;

// Re-export main types and functions
pub use labeler::{label_calls, nest_paths, CallPath, LabeledCall, LabeledTree, PathNode};
pub use metrics::{calculate_tree_stats, TreeStats};
pub use node::{call_stack_to_string, CallNode};
pub use stack_builder::build_call_tree;
