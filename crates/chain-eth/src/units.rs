//! Denomination conversion into wei.

use alloy_primitives::utils::{self, ParseUnits};
use alloy_primitives::U256;

use crate::error::EthError;

pub const GWEI: &str = "gwei";
pub const ETHER: &str = "ether";

/// Fractional gwei digits kept before handing the price to the unit parser.
const GWEI_DECIMALS: usize = 9;

/// Converts a gas price in gwei to wei, rounding to the nearest wei.
pub fn gwei_to_wei(gwei: f64) -> Result<U256, EthError> {
    if !gwei.is_finite() || gwei < 0.0 {
        return Err(EthError::EncodingError(format!(
            "gas price must be a non-negative finite number, got {gwei}"
        )));
    }

    let rounded = format!("{gwei:.prec$}", prec = GWEI_DECIMALS);
    parse_units(&rounded, GWEI)
        .map_err(|_| EthError::EncodingError(format!("gas price {gwei} gwei overflows")))
}

/// Converts a decimal ether amount (e.g. `"0.5"`) to wei.
pub fn ether_to_wei(ether: &str) -> Result<U256, EthError> {
    parse_units(ether, ETHER)
}

/// Parses a non-negative decimal amount denominated in `unit` (`"gwei"`,
/// `"ether"`, ...) into wei.
pub fn parse_units(amount: &str, unit: &str) -> Result<U256, EthError> {
    match utils::parse_units(amount.trim(), unit) {
        Ok(ParseUnits::U256(wei)) => Ok(wei),
        Ok(ParseUnits::I256(_)) => Err(EthError::EncodingError(format!(
            "amount must not be negative: {amount}"
        ))),
        Err(e) => Err(EthError::EncodingError(format!(
            "invalid {unit} amount {amount:?}: {e}"
        ))),
    }
}
