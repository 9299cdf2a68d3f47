use alloy_primitives::U256;
use chain_eth::units::gwei_to_wei;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

pub const DEFAULT_GAS_PRICE_GWEI: f64 = 21.0;
pub const DEFAULT_GAS_LIMIT_UNITS: u64 = 21_000;

/// Gas parameters applied to every signed transaction.
///
/// These are fixed inputs, not estimates. Wallets carry one and individual
/// sign calls may override it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GasConfig {
    pub gas_price_gwei: f64,
    pub gas_limit_units: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            gas_price_gwei: DEFAULT_GAS_PRICE_GWEI,
            gas_limit_units: DEFAULT_GAS_LIMIT_UNITS,
        }
    }
}

impl GasConfig {
    pub fn new(gas_price_gwei: f64, gas_limit_units: u64) -> Result<Self, WalletError> {
        let config = Self {
            gas_price_gwei,
            gas_limit_units,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        if !self.gas_price_gwei.is_finite() || self.gas_price_gwei < 0.0 {
            return Err(WalletError::Config(format!(
                "gasPriceGwei must be a non-negative number, got {}",
                self.gas_price_gwei
            )));
        }
        if self.gas_limit_units == 0 {
            return Err(WalletError::Config("gasLimitUnits must be positive".into()));
        }
        self.gas_price_wei()
            .map_err(|e| WalletError::Config(format!("gasPriceGwei: {e}")))?;
        Ok(())
    }

    /// Gas price converted to wei.
    pub fn gas_price_wei(&self) -> Result<U256, WalletError> {
        Ok(gwei_to_wei(self.gas_price_gwei)?)
    }
}
