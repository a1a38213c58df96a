//! Canonical call paths.
//!
//! Every call in a transaction gets a path string encoding its kind and its
//! position in the tree: `<kind>_<ordinal chain>`. The root is always
//! `call_0`. Child `i` of a call whose ordinal chain is `0_1` is
//! `call_0_1_i`, or `staticcall_0_1_i` when the child is read-only. Only the
//! call's own kind contributes a prefix; ancestry is the ordinal chain.

use super::node::CallNode;
use crate::parser::CallKind;
use crate::utils::config::{CALL_PATH_PREFIX, STATICCALL_PATH_PREFIX};
use crate::utils::error::PathError;
use std::fmt;
use std::str::FromStr;

/// Position and kind of one call within its transaction's call tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallPath {
    read_only: bool,
    ordinals: Vec<usize>,
}

impl CallPath {
    /// Path of the top-level call, `call_0`
    pub fn root() -> Self {
        Self {
            read_only: false,
            ordinals: vec![0],
        }
    }

    /// Path of this call's `index`-th nested call
    pub fn child(&self, index: usize, kind: CallKind) -> Self {
        let mut ordinals = Vec::with_capacity(self.ordinals.len() + 1);
        ordinals.extend_from_slice(&self.ordinals);
        ordinals.push(index);
        Self {
            read_only: kind.is_read_only(),
            ordinals,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn ordinals(&self) -> &[usize] {
        &self.ordinals
    }

    /// Ordinal chain of the enclosing call (empty for the root)
    pub fn parent_ordinals(&self) -> &[usize] {
        &self.ordinals[..self.ordinals.len() - 1]
    }

    /// Position among siblings
    pub fn index(&self) -> usize {
        self.ordinals[self.ordinals.len() - 1]
    }

    /// Nesting level, 0 for the root
    pub fn depth(&self) -> usize {
        self.ordinals.len() - 1
    }

    pub fn is_root(&self) -> bool {
        self.ordinals.len() == 1
    }

    fn prefix(&self) -> &'static str {
        if self.read_only {
            STATICCALL_PATH_PREFIX
        } else {
            CALL_PATH_PREFIX
        }
    }
}

impl fmt::Display for CallPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())?;
        for ordinal in &self.ordinals {
            write!(f, "_{}", ordinal)?;
        }
        Ok(())
    }
}

impl FromStr for CallPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PathError::InvalidPath(s.to_string());

        let (prefix, chain) = s.split_once('_').ok_or_else(invalid)?;
        let read_only = match prefix {
            CALL_PATH_PREFIX => false,
            STATICCALL_PATH_PREFIX => true,
            _ => return Err(invalid()),
        };

        let ordinals = chain
            .split('_')
            .map(|part| parse_ordinal(part).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()?;

        if ordinals[0] != 0 {
            return Err(invalid());
        }

        // The root is always labeled as a mutating call
        if ordinals.len() == 1 && read_only {
            return Err(invalid());
        }

        Ok(Self {
            read_only,
            ordinals,
        })
    }
}

/// Decimal ordinal in canonical form: digits only, no leading zeros
fn parse_ordinal(part: &str) -> Option<usize> {
    let canonical = !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'));
    if canonical {
        part.parse().ok()
    } else {
        None
    }
}

/// One call of the tree together with its path
#[derive(Debug, Clone, Copy)]
pub struct LabeledCall<'a> {
    pub path: &'a CallPath,
    pub node: &'a CallNode,
}

/// Calls of a tree paired with their paths, in pre-order
#[derive(Debug, Clone)]
pub struct LabeledTree<'a> {
    entries: Vec<(CallPath, &'a CallNode)>,
}

impl<'a> LabeledTree<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LabeledCall<'_>> + '_ {
        self.entries
            .iter()
            .map(|(path, node)| LabeledCall { path, node: *node })
    }

    pub fn paths(&self) -> impl Iterator<Item = &CallPath> + '_ {
        self.entries.iter().map(|(path, _)| path)
    }
}

/// Label every call of a tree, walking it in pre-order
///
/// **Public** - main entry point for labeling
///
/// The walk uses an explicit stack, so tree depth does not grow the
/// thread's call stack. Labels depend only on the tree shape and the kind
/// of each call, so labeling the same tree twice gives identical paths.
pub fn label_calls(root: &CallNode) -> LabeledTree<'_> {
    let mut entries = Vec::with_capacity(root.node_count());
    let mut pending = vec![(CallPath::root(), root)];

    while let Some((path, node)) = pending.pop() {
        // Reverse so the first child is visited first
        for (index, child) in node.calls.iter().enumerate().rev() {
            pending.push((path.child(index, child.kind), child));
        }
        entries.push((path, node));
    }

    LabeledTree { entries }
}

/// A call path with the paths nested under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    pub path: CallPath,
    pub children: Vec<PathNode>,
}

/// Regroup a pre-ordered list of call paths into their nesting
///
/// Each path must directly follow its parent or one of its parent's earlier
/// descendants, and siblings must appear with consecutive indices.
///
/// # Errors
/// * `PathError::OutOfOrder` - The list is not a pre-order walk of one tree
pub fn nest_paths(paths: &[CallPath]) -> Result<Option<PathNode>, PathError> {
    let mut open: Vec<PathNode> = Vec::new();
    let out_of_order = |path: &CallPath| PathError::OutOfOrder {
        path: path.to_string(),
    };

    for path in paths {
        if open.is_empty() {
            if !path.is_root() {
                return Err(out_of_order(path));
            }
            open.push(PathNode {
                path: path.clone(),
                children: Vec::new(),
            });
            continue;
        }

        // Close finished subtrees until the parent of `path` is on top
        loop {
            let Some(top) = open.last() else {
                return Err(out_of_order(path));
            };
            if top.path.ordinals() == path.parent_ordinals() {
                break;
            }
            let finished = open.pop().ok_or_else(|| out_of_order(path))?;
            match open.last_mut() {
                Some(parent) => parent.children.push(finished),
                None => return Err(out_of_order(path)),
            }
        }

        let parent = open.last().ok_or_else(|| out_of_order(path))?;
        if path.is_root() || path.index() != parent.children.len() {
            return Err(out_of_order(path));
        }

        open.push(PathNode {
            path: path.clone(),
            children: Vec::new(),
        });
    }

    while let Some(finished) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(finished),
            None => return Ok(Some(finished)),
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let root = CallPath::root();
        assert_eq!(root.to_string(), "call_0");

        let child = root.child(1, CallKind::Call);
        assert_eq!(child.to_string(), "call_0_1");

        let grandchild = child.child(1, CallKind::StaticCall);
        assert_eq!(grandchild.to_string(), "staticcall_0_1_1");

        // Only the call's own kind contributes the prefix
        let great = grandchild.child(0, CallKind::DelegateCall);
        assert_eq!(great.to_string(), "call_0_1_1_0");
    }

    #[test]
    fn test_path_parse() {
        let path: CallPath = "staticcall_0_0_1".parse().unwrap();
        assert!(path.is_read_only());
        assert_eq!(path.ordinals(), &[0, 0, 1]);
        assert_eq!(path.parent_ordinals(), &[0, 0]);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.index(), 1);
        assert_eq!(path.to_string(), "staticcall_0_0_1");
    }

    #[test]
    fn test_path_parse_rejects_garbage() {
        for bad in [
            "",
            "call",
            "call_",
            "call_1",
            "delegatecall_0",
            "call_0_x",
            "staticcall_0",
            "call_00",
            "call_0_01",
            "call_0_+1",
            "call_0_-1",
            "call_0__1",
        ] {
            assert!(bad.parse::<CallPath>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_path_parse_round_trips() {
        for raw in ["call_0", "call_0_10", "staticcall_0_0_1", "call_0_1_100_0"] {
            let path: CallPath = raw.parse().unwrap();
            assert_eq!(path.to_string(), raw);
        }
    }

    fn paths(raw: &[&str]) -> Vec<CallPath> {
        raw.iter().map(|p| p.parse().unwrap()).collect()
    }

    #[test]
    fn test_nest_paths() {
        let nested = nest_paths(&paths(&[
            "call_0",
            "call_0_0",
            "call_0_0_0",
            "staticcall_0_0_1",
            "call_0_1",
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(nested.children.len(), 2);
        assert_eq!(nested.children[0].children.len(), 2);
        assert!(nested.children[1].children.is_empty());
        assert!(nested.children[0].children[1].path.is_read_only());
    }

    #[test]
    fn test_nest_paths_empty() {
        assert_eq!(nest_paths(&[]).unwrap(), None);
    }

    #[test]
    fn test_nest_paths_rejects_gaps_and_disorder() {
        assert!(nest_paths(&paths(&["call_0_0"])).is_err());
        assert!(nest_paths(&paths(&["call_0", "call_0_1"])).is_err());
        assert!(nest_paths(&paths(&["call_0", "call_0_0_0"])).is_err());
        assert!(nest_paths(&paths(&["call_0", "call_0_0", "call_0"])).is_err());
        assert!(nest_paths(&paths(&["call_0", "call_0_1", "call_0_0"])).is_err());
    }
}
