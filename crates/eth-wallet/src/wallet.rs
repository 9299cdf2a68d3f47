use chain_eth::encoding::decode_hex_lenient;
use chain_eth::message::{recover_personal_signer_hex, sign_personal_message_hex};
use chain_eth::network::Network;
use chain_eth::transaction::{Eip155Signer, RawTransaction, SignTransaction};
use tracing::{debug, trace};

use crate::config::GasConfig;
use crate::error::WalletError;
use crate::hd_derivation;
use crate::private_key::PrivateKey;

/// A single-address Ethereum wallet.
///
/// Holds exactly one spending key, fixed at construction. Every operation
/// recomputes from that key; nothing is cached or mutated, so a `Wallet` can
/// be shared across threads for signing.
#[derive(Debug, Clone)]
pub struct Wallet {
    network: Network,
    private_key: PrivateKey,
    gas: GasConfig,
}

impl Wallet {
    /// Derives the spending key at `m/44'/coin_type'/0'/0'/0'` from `seed`.
    ///
    /// The seed is not retained.
    pub fn from_seed(seed: &[u8], network: Network) -> Result<Self, WalletError> {
        let private_key = hd_derivation::derive_spending_key(seed, &network)?;
        debug!(%network, "wallet created from seed");
        Ok(Self {
            network,
            private_key,
            gas: GasConfig::default(),
        })
    }

    /// Imports a raw hex private key (optional `0x`, any case).
    pub fn from_private_key(network: Network, private_key: &str) -> Result<Self, WalletError> {
        let private_key = PrivateKey::from_hex(private_key)?;
        debug!(%network, "wallet imported from private key");
        Ok(Self {
            network,
            private_key,
            gas: GasConfig::default(),
        })
    }

    /// Replaces the gas parameters used by [`Self::sign_transaction`].
    pub fn with_gas_config(mut self, gas: GasConfig) -> Result<Self, WalletError> {
        gas.validate()?;
        self.gas = gas;
        Ok(self)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn gas_config(&self) -> &GasConfig {
        &self.gas
    }

    /// EIP-55 checksummed address of the spending key.
    pub fn generate_address(&self) -> String {
        self.private_key.address()
    }

    /// The spending key as lowercase hex without `0x`.
    pub fn export_private_key(&self) -> String {
        self.private_key.to_hex()
    }

    /// Signs `tx` with the wallet's gas config and returns the `0x`-prefixed
    /// raw transaction.
    pub fn sign_transaction(&self, tx: &RawTransaction) -> Result<String, WalletError> {
        self.sign_transaction_with(tx, &self.gas)
    }

    /// Signs `tx` with an explicit gas config for this call only.
    pub fn sign_transaction_with(
        &self,
        tx: &RawTransaction,
        gas: &GasConfig,
    ) -> Result<String, WalletError> {
        gas.validate()?;
        let params = SignTransaction {
            raw_transaction: tx.clone(),
            gas_price: gas.gas_price_wei()?,
            gas_limit: gas.gas_limit_units,
        };

        let signer = Eip155Signer::new(self.network.chain_id());
        let signed = signer.sign(&params, self.private_key.signing_key())?;
        debug!(
            chain_id = signer.chain_id(),
            nonce = tx.nonce,
            v = signed.v,
            tx_hash = %signed.hash_hex(),
            "signed transaction"
        );
        Ok(signed.raw_hex())
    }

    /// Signs a hex-encoded message with `personal_sign`.
    ///
    /// The optional `0x` is stripped before decoding. Returns the `0x`-prefixed
    /// 65-byte signature with `v` in {27, 28}.
    pub fn sign_hex(&self, hex_message: &str) -> Result<String, WalletError> {
        let message = decode_hex_lenient(hex_message);
        trace!(len = message.len(), "signing personal message");
        Ok(sign_personal_message_hex(
            &message,
            self.private_key.signing_key(),
        )?)
    }

    /// Signs a text message with `personal_sign` via its UTF-8 bytes.
    pub fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        self.sign_hex(&hex::encode(message.as_bytes()))
    }

    /// Checks that `signature` over `message` was produced by this wallet.
    pub fn verify_message(&self, message: &[u8], signature: &str) -> Result<bool, WalletError> {
        let signer = recover_personal_signer_hex(message, signature)?;
        Ok(signer == self.generate_address())
    }
}
