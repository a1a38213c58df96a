//! Build the nested call tree from flat call/return events.
//!
//! The builder keeps an explicit stack of currently open calls, mirroring
//! the execution depth. A call one level deeper than the top opens a child.
//! A call at the same depth or shallower means the open calls down to its
//! parent have returned: each of them is popped and resolved with the next
//! return event, then moved into its parent's `calls`.
//!
//! Example depth sequence `[0, 1, 2, 2, 1]`:
//! ```text
//! call_0
//!   call_0_0
//!     call_0_0_0
//!     call_0_0_1
//!   call_0_1
//! ```

use super::node::CallNode;
use crate::parser::{CallEvent, ReturnEvent};
use crate::utils::error::MalformedTrace;
use log::debug;
use std::slice::Iter;

/// Build the call tree of one transaction
///
/// **Public** - main entry point for tree reconstruction
///
/// # Arguments
/// * `calls` - Call-enter events in execution order
/// * `returns` - Call-return events in completion order
///
/// # Returns
/// The root call, or `None` if the transaction made no calls
///
/// # Errors
/// Any `MalformedTrace` variant. Reconstruction never returns a partial tree.
pub fn build_call_tree(
    calls: &[CallEvent],
    returns: &[ReturnEvent],
) -> Result<Option<CallNode>, MalformedTrace> {
    let mut returns = returns.iter();

    if calls.is_empty() {
        return match returns.len() {
            0 => Ok(None),
            remaining => Err(MalformedTrace::UnconsumedReturns { remaining }),
        };
    }

    debug!("Building call tree from {} call events", calls.len());

    let mut open: Vec<CallNode> = Vec::new();

    for (index, event) in calls.iter().enumerate() {
        let Some(top) = open.last() else {
            if event.depth != 0 {
                return Err(MalformedTrace::RootDepth { depth: event.depth });
            }
            open.push(CallNode::open(event));
            continue;
        };

        let open_depth = top.depth;

        if event.depth > open_depth && event.depth - open_depth > 1 {
            return Err(MalformedTrace::DepthSkip {
                index,
                depth: event.depth,
                open_depth,
            });
        }

        if event.depth == 0 {
            return Err(MalformedTrace::SecondRoot {
                index,
                depth: event.depth,
            });
        }

        // Calls at this depth or deeper have completed
        while open.last().is_some_and(|node| node.depth >= event.depth) {
            let Some(node) = open.pop() else { break };
            close(node, &mut open, &mut returns)?;
        }

        open.push(CallNode::open(event));
    }

    let mut root = None;
    while let Some(node) = open.pop() {
        root = close(node, &mut open, &mut returns)?;
    }

    let remaining = returns.len();
    if remaining > 0 {
        return Err(MalformedTrace::UnconsumedReturns { remaining });
    }

    if let Some(root) = root.as_ref() {
        debug!("Built call tree with {} nodes", root.node_count());
    }

    Ok(root)
}

/// Resolve a popped call with the next return and move it into its parent.
/// Returns the node itself when it was the root.
fn close(
    mut node: CallNode,
    open: &mut [CallNode],
    returns: &mut Iter<'_, ReturnEvent>,
) -> Result<Option<CallNode>, MalformedTrace> {
    let ret = returns.next().ok_or(MalformedTrace::ReturnsExhausted {
        open: open.len() + 1,
    })?;
    node.resolve(ret.clone());

    match open.last_mut() {
        Some(parent) => {
            parent.calls.push(node);
            Ok(None)
        }
        None => Ok(Some(node)),
    }
}
