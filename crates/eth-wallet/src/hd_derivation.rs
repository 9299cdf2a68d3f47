use std::fmt;

use bip32::{ChildNumber, XPrv};
use chain_eth::network::Network;
use tracing::debug;
use zeroize::Zeroize;

use crate::error::WalletError;
use crate::private_key::PrivateKey;

/// BIP-44 purpose level.
pub const PURPOSE: u32 = 44;

/// One level of a BIP-32 derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationStep {
    pub index: u32,
    pub hardened: bool,
}

impl DerivationStep {
    pub const fn hardened(index: u32) -> Self {
        Self { index, hardened: true }
    }

    pub const fn normal(index: u32) -> Self {
        Self { index, hardened: false }
    }

    fn child_number(&self) -> Result<ChildNumber, WalletError> {
        ChildNumber::new(self.index, self.hardened)
            .map_err(|e| WalletError::Derivation(format!("index {}: {e}", self.index)))
    }
}

impl fmt::Display for DerivationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// The wallet's fixed path: `m/44'/coin_type'/0'/0'/0'`.
///
/// Canonical BIP-44 leaves the change and address-index levels unhardened
/// (`m/44'/60'/0'/0/0`). Wallets created by this scheme harden both, so the
/// path must stay as-is or existing seeds would resolve to other addresses.
pub fn wallet_path(network: &Network) -> [DerivationStep; 5] {
    [
        DerivationStep::hardened(PURPOSE),
        DerivationStep::hardened(network.coin_type()),
        DerivationStep::hardened(0), // account
        DerivationStep::hardened(0), // external chain
        DerivationStep::hardened(0), // address index
    ]
}

/// Renders steps as `m/44'/60'/...`.
pub fn path_string(steps: &[DerivationStep]) -> String {
    let mut path = String::from("m");
    for step in steps {
        path.push('/');
        path.push_str(&step.to_string());
    }
    path
}

/// Derives the wallet's spending key from a seed.
///
/// The seed length is checked by the master-key derivation; any failing
/// child step is reported rather than skipped.
pub fn derive_spending_key(seed: &[u8], network: &Network) -> Result<PrivateKey, WalletError> {
    let steps = wallet_path(network);
    let key = derive_along(seed, &steps)?;
    debug!(%network, path = %path_string(&steps), "derived spending key");
    Ok(key)
}

/// Walks `steps` from the master key of `seed`, keeping only the final key.
pub fn derive_along(seed: &[u8], steps: &[DerivationStep]) -> Result<PrivateKey, WalletError> {
    let mut xprv = XPrv::new(seed)
        .map_err(|e| WalletError::Derivation(format!("master key: {e}")))?;

    for step in steps {
        xprv = xprv
            .derive_child(step.child_number()?)
            .map_err(|e| WalletError::Derivation(format!("step {step}: {e}")))?;
    }

    let mut private_key_bytes: [u8; 32] = xprv.to_bytes().into();
    let key = PrivateKey::from_bytes(&private_key_bytes)
        .map_err(|e| WalletError::Derivation(e.to_string()));
    private_key_bytes.zeroize();
    key
}
