//! `0x` quantity helpers for the receipt API.
//!
//! Addresses, byte strings and `U256` values use the serde impls of
//! `alloy-primitives` directly. Plain integer fields go through `U64` here so
//! they render the same way (`0x0`, `0x1a`), and are read back leniently.

use crate::utils::error::ParseError;
use alloy_primitives::U64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parse a quantity from hex (`0x` prefix) or decimal string
pub fn parse_quantity(value: &str) -> Result<u64, ParseError> {
    if let Some(hex_str) = value.strip_prefix("0x") {
        u64::from_str_radix(hex_str, 16)
            .map_err(|e| ParseError::InvalidQuantity(format!("{}: {}", value, e)))
    } else {
        value
            .parse::<u64>()
            .map_err(|e| ParseError::InvalidQuantity(format!("{}: {}", value, e)))
    }
}

pub fn serialize_quantity<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    U64::from(*value).serialize(serializer)
}

pub fn serialize_opt_quantity<S: Serializer>(
    value: &Option<u64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize_quantity(v, serializer),
        None => serializer.serialize_none(),
    }
}

pub fn serialize_status<S: Serializer>(status: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serialize_quantity(&u64::from(*status), serializer)
}

/// Raw JSON forms a quantity may arrive in
#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(u64),
    Text(String),
}

impl RawQuantity {
    fn into_u64(self) -> Result<u64, ParseError> {
        match self {
            RawQuantity::Number(n) => Ok(n),
            RawQuantity::Text(s) => parse_quantity(&s),
        }
    }
}

/// Accept a JSON number, a decimal string, or a `0x` hex string
pub fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    RawQuantity::deserialize(deserializer)?
        .into_u64()
        .map_err(serde::de::Error::custom)
}

pub fn deserialize_opt_quantity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    Option::<RawQuantity>::deserialize(deserializer)?
        .map(RawQuantity::into_u64)
        .transpose()
        .map_err(serde::de::Error::custom)
}

pub fn deserialize_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = deserialize_quantity(deserializer)?;
    u32::try_from(value).map_err(serde::de::Error::custom)
}
