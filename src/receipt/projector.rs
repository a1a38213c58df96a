//! Flatten a labeled call tree into receipt records.

use super::schema::InternalTxRecord;
use crate::calltree::{build_call_tree, label_calls, CallNode, LabeledCall};
use crate::parser::{CallEvent, ReturnEvent};
use crate::utils::error::MalformedTrace;
use log::debug;

/// Project every call of a tree into a record, in pre-order
///
/// **Public** - main entry point for projection
pub fn project(root: &CallNode) -> Vec<InternalTxRecord> {
    let labeled = label_calls(root);
    let records: Vec<InternalTxRecord> = labeled.iter().map(to_record).collect();

    debug!("Projected {} internal transaction records", records.len());

    records
}

/// Build, label and project one transaction's internal calls
///
/// **Public** - convenience for the receipt API
///
/// # Returns
/// Records in pre-order; empty when the transaction made no calls
///
/// # Errors
/// * `MalformedTrace` - The events do not form a call tree
pub fn internal_transactions(
    calls: &[CallEvent],
    returns: &[ReturnEvent],
) -> Result<Vec<InternalTxRecord>, MalformedTrace> {
    Ok(build_call_tree(calls, returns)?
        .map(|root| project(&root))
        .unwrap_or_default())
}

fn to_record(call: LabeledCall<'_>) -> InternalTxRecord {
    let node = call.node;
    InternalTxRecord {
        call_path: call.path.to_string(),
        from: node.from,
        to: node.to,
        gas: node.gas,
        value: node.value,
        input: node.input.clone(),
        status: node.status_code,
        gas_used: node.gas_used(),
        output: node.output.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CallKind;
    use alloy_primitives::{Address, Bytes, U256};

    #[test]
    fn test_gas_used_when_tracked() {
        let calls = vec![
            CallEvent::new(0, CallKind::Call, Address::ZERO, Address::ZERO, Bytes::new())
                .with_gas(1_000),
            CallEvent::new(1, CallKind::Call, Address::ZERO, Address::ZERO, Bytes::new())
                .with_value(U256::from(5)),
        ];
        let returns = vec![
            ReturnEvent::new(Bytes::new(), 0, 100),
            ReturnEvent::new(Bytes::new(), 0, 400),
        ];

        let records = internal_transactions(&calls, &returns).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].gas, Some(1_000));
        assert_eq!(records[0].gas_used, Some(600));
        assert_eq!(records[1].gas, None);
        assert_eq!(records[1].gas_used, None);
        assert_eq!(records[1].value, U256::from(5));
    }

    #[test]
    fn test_untracked_gas_is_omitted() {
        let calls = vec![CallEvent::new(
            0,
            CallKind::Call,
            Address::ZERO,
            Address::ZERO,
            Bytes::new(),
        )];
        let returns = vec![ReturnEvent::new(Bytes::new(), 1, 0)];

        let records = internal_transactions(&calls, &returns).unwrap();
        let json = serde_json::to_value(&records[0]).unwrap();

        assert!(json.get("gas").is_none());
        assert!(json.get("gasUsed").is_none());
        assert_eq!(json["status"], "0x1");
        assert_eq!(json["value"], "0x0");
        assert_eq!(json["input"], "0x");
    }

    #[test]
    fn test_empty_trace_gives_no_records() {
        assert!(internal_transactions(&[], &[]).unwrap().is_empty());
    }
}
