//! Helix Wallet Core - multi-chain key derivation and address management
//!
//! This library turns a single root secret (a BIP-39 mnemonic, an imported
//! private key, or a connected external signer) into per-chain sets of
//! deterministic addresses, and tracks the current address per chain for
//! the surrounding application (balance display, send/receive, QR codes).

pub mod error;
pub mod registry;
pub mod crypto;
pub mod address;
pub mod signer;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use registry::{AddressFamily, ChainDescriptor, Network};
pub use store::{DerivedAddress, WalletStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
