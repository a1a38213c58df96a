//! Output writers for trace reports.
//!
//! This module handles:
//! - Assembling reports from call trees
//! - Writing and reading JSON reports

pub mod json;
pub mod report;

// Re-export main functions
pub use json::{read_report, to_pretty_json, write_json, write_report};
pub use report::{check_report, to_report, TraceReport};
