use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EthError;

/// BIP-44 coin type registered for Ether.
pub const ETHER_COIN_TYPE: u32 = 60;

/// BIP-44 coin type shared by all test networks.
pub const TESTNET_COIN_TYPE: u32 = 1;

/// An Ethereum network the wallet signs for.
///
/// The network fixes two things: the BIP-44 coin type used during key
/// derivation and the chain ID mixed into EIP-155 transaction signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Ethereum Mainnet (chain ID 1).
    Mainnet,
    /// Ropsten proof-of-work testnet (chain ID 3).
    Ropsten,
    /// Kovan proof-of-authority testnet (chain ID 42).
    Kovan,
    /// Any other chain. `test_use` selects the testnet coin type.
    Private { chain_id: u64, test_use: bool },
}

impl Network {
    /// BIP-44 coin type for this network.
    pub fn coin_type(&self) -> u32 {
        match self {
            Network::Mainnet => ETHER_COIN_TYPE,
            Network::Ropsten | Network::Kovan => TESTNET_COIN_TYPE,
            Network::Private { test_use, .. } => {
                if *test_use {
                    TESTNET_COIN_TYPE
                } else {
                    ETHER_COIN_TYPE
                }
            }
        }
    }

    /// EIP-155 chain ID.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Ropsten => 3,
            Network::Kovan => 42,
            Network::Private { chain_id, .. } => *chain_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Ropsten => "ropsten",
            Network::Kovan => "kovan",
            Network::Private { .. } => "private",
        }
    }

    pub fn is_testnet(&self) -> bool {
        self.coin_type() == TESTNET_COIN_TYPE
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Private { chain_id, .. } => write!(f, "private({chain_id})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Network {
    type Err = EthError;

    /// Parses a named public network. Private networks have no name and must
    /// be built with [`Network::Private`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "ropsten" => Ok(Network::Ropsten),
            "kovan" => Ok(Network::Kovan),
            other => Err(EthError::UnknownNetwork(other.to_string())),
        }
    }
}
