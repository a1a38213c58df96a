use crate::receipt::MalformedPolicy;
use crate::utils::config::{TraceLimits, DEFAULT_MAX_CALLS, DEFAULT_MAX_DEPTH};
use std::path::PathBuf;

/// Arguments for the export command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ExportArgs {
    /// Transaction store JSON file
    pub store_path: PathBuf,

    /// Transaction hash to export
    pub transaction_hash: String,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Maximum number of internal calls accepted
    pub max_calls: usize,

    /// Maximum call depth accepted
    pub max_depth: u32,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("store.json"),
            transaction_hash: String::new(),
            output_json: PathBuf::from("report.json"),
            print_summary: false,
            max_calls: DEFAULT_MAX_CALLS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExportArgs {
    pub fn limits(&self) -> TraceLimits {
        TraceLimits::new(self.max_calls, self.max_depth)
    }
}

/// Arguments shared by the lookup commands (`tree`, `receipt`, `block`)
#[derive(Debug, Clone)]
pub struct LookupArgs {
    /// Transaction store JSON file
    pub store_path: PathBuf,

    /// Return degraded receipts instead of failing on malformed traces
    pub degrade: bool,

    /// Maximum number of internal calls accepted
    pub max_calls: usize,

    /// Maximum call depth accepted
    pub max_depth: u32,
}

impl Default for LookupArgs {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("store.json"),
            degrade: false,
            max_calls: DEFAULT_MAX_CALLS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LookupArgs {
    pub fn policy(&self) -> MalformedPolicy {
        if self.degrade {
            MalformedPolicy::Degrade
        } else {
            MalformedPolicy::Fail
        }
    }

    pub fn limits(&self) -> TraceLimits {
        TraceLimits::new(self.max_calls, self.max_depth)
    }
}
