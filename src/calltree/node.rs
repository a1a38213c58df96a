//! Call tree node.
//!
//! Serializes to the nested call-stack shape:
//! `From`, `To`, `Input`, `Output`, `StatusCode`, `GasLeft`, `Calls`
//! (`null` for leaves).

use crate::parser::{CallEvent, CallKind, ReturnEvent};
use alloy_primitives::{Address, Bytes, U256};
use serde::{Serialize, Serializer};

/// One internal call, owning its nested calls in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallNode {
    #[serde(skip)]
    pub depth: u32,

    #[serde(skip)]
    pub kind: CallKind,

    #[serde(rename = "From")]
    pub from: Address,

    #[serde(rename = "To")]
    pub to: Address,

    #[serde(rename = "Input")]
    pub input: Bytes,

    #[serde(rename = "Output")]
    pub output: Bytes,

    #[serde(rename = "StatusCode")]
    pub status_code: u32,

    #[serde(rename = "GasLeft")]
    pub gas_left: u64,

    /// Gas available at entry, if tracked
    #[serde(skip)]
    pub gas: Option<u64>,

    #[serde(skip)]
    pub value: U256,

    #[serde(rename = "Calls", serialize_with = "serialize_calls")]
    pub calls: Vec<CallNode>,
}

impl CallNode {
    /// Open a node from its call event; output fields stay empty until resolved
    pub fn open(event: &CallEvent) -> Self {
        Self {
            depth: event.depth,
            kind: event.kind,
            from: event.from,
            to: event.to,
            input: event.input.clone(),
            output: Bytes::new(),
            status_code: 0,
            gas_left: 0,
            gas: event.gas,
            value: event.value,
            calls: Vec::new(),
        }
    }

    /// Fill in the result of the call from its matching return
    pub fn resolve(&mut self, ret: ReturnEvent) {
        self.output = ret.output;
        self.status_code = ret.status_code;
        self.gas_left = ret.gas_left;
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 0
    }

    /// Gas consumed by this call, or `None` if entry gas was not tracked
    pub fn gas_used(&self) -> Option<u64> {
        self.gas.map(|gas| gas.saturating_sub(self.gas_left))
    }

    /// Number of nodes in this subtree, this node included
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.calls.iter());
        }
        count
    }
}

#[allow(clippy::ptr_arg)]
fn serialize_calls<S: Serializer>(calls: &Vec<CallNode>, serializer: S) -> Result<S::Ok, S::Error> {
    if calls.is_empty() {
        serializer.serialize_none()
    } else {
        calls.serialize(serializer)
    }
}

/// Serialize the nested call stack as pretty-printed JSON
pub fn call_stack_to_string(root: &CallNode) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(root)
}
