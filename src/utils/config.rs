//! Configuration and constants for the library and CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Upstream caps on trace size. Deep or wide internal call trees are
// attacker-influenced, so the API layer rejects them before building.
pub const DEFAULT_MAX_CALLS: usize = 100_000;
pub const DEFAULT_MAX_DEPTH: u32 = 1024;

/// Trees deeper than this get a warning in the logs
pub const DEEP_TREE_WARNING_DEPTH: u32 = 64;

/// Path prefix for value-mutating calls (and always for the root)
pub const CALL_PATH_PREFIX: &str = "call";

/// Path prefix for read-only calls
pub const STATICCALL_PATH_PREFIX: &str = "staticcall";

/// Size limits applied to a transaction's trace before reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceLimits {
    /// Maximum number of internal calls
    pub max_calls: usize,

    /// Maximum call depth (the top-level call is depth 0)
    pub max_depth: u32,
}

impl Default for TraceLimits {
    fn default() -> Self {
        Self {
            max_calls: DEFAULT_MAX_CALLS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TraceLimits {
    pub fn new(max_calls: usize, max_depth: u32) -> Self {
        Self {
            max_calls,
            max_depth,
        }
    }
}
