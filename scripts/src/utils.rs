//! Utilities for the deploy scripts.

use std::str::FromStr;

use alloy::primitives::{Address, I256, U256};

use crate::errors::ScriptError;

/// Converts a comma-separated string of integers into a list of integers
pub fn parse_int_slice(arg: &str) -> Result<Vec<i64>, ScriptError> {
    parse_slice(arg)
}

/// Converts a comma-separated string of addresses into a list of addresses
pub fn parse_address_slice(arg: &str) -> Result<Vec<Address>, ScriptError> {
    parse_slice(arg)
}

/// Parses a decimal wei amount
pub fn parse_wei(arg: &str) -> Result<U256, ScriptError> {
    U256::from_str_radix(arg.trim(), 10)
        .map_err(|e| ScriptError::ArgumentParsing(format!("{arg}: {e}")))
}

/// Parses a signed decimal integer of up to 256 bits
pub fn parse_i256(arg: &str) -> Result<I256, ScriptError> {
    I256::from_dec_str(arg.trim()).map_err(|e| ScriptError::ArgumentParsing(format!("{arg}: {e}")))
}

/// Splits on commas, skipping empty fields, and parses every trimmed field
fn parse_slice<T>(arg: &str) -> Result<Vec<T>, ScriptError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<T>()
                .map_err(|e| ScriptError::ArgumentParsing(format!("{s}: {e}")))
        })
        .collect()
}
