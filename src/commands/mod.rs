//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod export;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use export::{execute_export, parse_tx_hash, validate_args};
pub use models::{ExportArgs, LookupArgs};
pub use utils::{
    display_schema, display_version, print_block_receipts, print_call_stack, print_receipt,
    validate_report_file,
};
