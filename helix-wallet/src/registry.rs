//! Chain registry
//!
//! Static table mapping a chain symbol to its derivation configuration.
//! Adding a chain means adding a descriptor here; no other module may
//! branch on a chain symbol by name.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Address encoding families supported by the wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressFamily {
    /// Ethereum and EVM compatible chains
    Evm,
    /// Bitcoin-style P2PKH chains
    Utxo,
    /// Simplified single-component privacy-coin scheme
    SimplifiedPrivacyCoin,
}

/// Per-family network parameters consulted by the address codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    /// EVM chains share one address format; they differ only by chain id
    Evm,
    /// P2PKH version byte prepended to the public key hash
    Utxo { version_byte: u8 },
    /// Leading byte of the simplified privacy-coin address
    Privacy { prefix_byte: u8 },
}

/// Immutable description of one supported chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainDescriptor {
    /// Ticker symbol, unique within the registry
    pub symbol: &'static str,
    /// Human-readable name for chain-selection UI
    pub display_name: &'static str,
    /// Address encoding family
    pub family: AddressFamily,
    /// Derivation path template; `{index}` marks the address index slot
    pub path_template: &'static str,
    /// Network parameters for the address codec
    pub network: Network,
    /// EVM chain id where applicable
    pub chain_id: Option<u64>,
}

/// The fixed set of supported chains, in registration order
static CHAINS: &[ChainDescriptor] = &[
    ChainDescriptor {
        symbol: "ETH",
        display_name: "Ethereum",
        family: AddressFamily::Evm,
        path_template: "m/44'/60'/0'/0/{index}",
        network: Network::Evm,
        chain_id: Some(1),
    },
    ChainDescriptor {
        symbol: "ALT",
        display_name: "Altcoinchain",
        family: AddressFamily::Evm,
        path_template: "m/44'/60'/0'/0/{index}",
        network: Network::Evm,
        chain_id: Some(2330),
    },
    ChainDescriptor {
        symbol: "BTC",
        display_name: "Bitcoin",
        family: AddressFamily::Utxo,
        path_template: "m/44'/0'/0'/0/{index}",
        network: Network::Utxo { version_byte: 0x00 },
        chain_id: None,
    },
    ChainDescriptor {
        symbol: "LTC",
        display_name: "Litecoin",
        family: AddressFamily::Utxo,
        path_template: "m/44'/2'/0'/0/{index}",
        network: Network::Utxo { version_byte: 0x30 },
        chain_id: None,
    },
    ChainDescriptor {
        symbol: "XMR",
        display_name: "Monero",
        family: AddressFamily::SimplifiedPrivacyCoin,
        path_template: "m/44'/128'/0'/{index}'",
        network: Network::Privacy { prefix_byte: 0x12 },
        chain_id: None,
    },
];

/// Look up the descriptor for a chain symbol
pub fn describe(symbol: &str) -> Result<&'static ChainDescriptor> {
    CHAINS
        .iter()
        .find(|c| c.symbol == symbol)
        .ok_or_else(|| Error::UnsupportedChain(symbol.to_string()))
}

/// List all supported chain symbols in registration order
pub fn list_supported() -> Vec<&'static str> {
    CHAINS.iter().map(|c| c.symbol).collect()
}

/// Iterate over all registered descriptors
pub fn all() -> impl Iterator<Item = &'static ChainDescriptor> {
    CHAINS.iter()
}

impl ChainDescriptor {
    /// Render the derivation path for an address index
    pub fn derivation_path(&self, index: u32) -> String {
        self.path_template.replace("{index}", &index.to_string())
    }
}
