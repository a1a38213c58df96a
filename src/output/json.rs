//! JSON report output writer.
//!
//! Writes TraceReport structs to JSON files with proper formatting.

use super::report::TraceReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &TraceReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_json(report, output_path)
}

/// Write any serializable value as pretty-printed JSON
pub fn write_json<T: Serialize>(value: &T, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    info!(
        "JSON written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Render any serializable value as pretty-printed JSON
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, OutputError> {
    serde_json::to_string_pretty(value).map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<TraceReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    // Each nested call adds two JSON levels to the call stack
    let mut deserializer = serde_json::Deserializer::from_reader(BufReader::new(file));
    deserializer.disable_recursion_limit();
    let report = TraceReport::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(OutputError::SerializationFailed)?;
    deserializer.end().map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, tx {}",
        report.version, report.transaction_hash
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::to_report;
    use alloy_primitives::B256;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_and_read_report() {
        let report = to_report(B256::repeat_byte(0x11), 42, None).unwrap();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.transaction_hash, report.transaction_hash);
        assert_eq!(loaded.block_number, 42);
        assert_eq!(loaded.stats, report.stats);
    }

    #[test]
    fn test_deep_call_stack_reads_back() {
        use crate::calltree::build_call_tree;
        use crate::output::check_report;
        use crate::parser::{CallEvent, CallKind, ReturnEvent};
        use alloy_primitives::{Address, Bytes};

        let calls: Vec<CallEvent> = (0..100)
            .map(|depth| {
                CallEvent::new(depth, CallKind::Call, Address::ZERO, Address::ZERO, Bytes::new())
            })
            .collect();
        let returns: Vec<ReturnEvent> = (0..100)
            .map(|_| ReturnEvent::new(Bytes::new(), 0, 0))
            .collect();
        let root = build_call_tree(&calls, &returns).unwrap();

        let report = to_report(B256::repeat_byte(0x22), 7, root.as_ref()).unwrap();
        let temp_file = NamedTempFile::new().unwrap();
        write_report(&report, temp_file.path()).unwrap();

        let loaded = read_report(temp_file.path()).unwrap();
        assert_eq!(loaded.stats.call_count, 100);
        assert_eq!(loaded.stats.max_depth, 99);
        assert_eq!(loaded.call_stack, report.call_stack);
        assert!(check_report(&loaded).unwrap().is_some());
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        let report = to_report(B256::ZERO, 1, None).unwrap();
        write_report(&report, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
