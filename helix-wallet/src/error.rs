//! Error types for the wallet core

use thiserror::Error;

/// Custom error type for wallet core operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("Unsupported derivation path: {0}")]
    UnsupportedPath(String),

    #[error("Derivation index out of range: {0}")]
    DerivationOverflow(u32),

    #[error("No root secret has been initialized")]
    NoRootSecret,

    #[error("No signer available: {0}")]
    NoSignerAvailable(String),

    #[error("Signer handshake timed out after {0:?}")]
    SignerTimeout(std::time::Duration),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Address encoding error: {0}")]
    AddressEncoding(String),

    #[error("Not supported: {0}")]
    NotSupported(String),
}

/// Result type for wallet core operations
pub type Result<T> = std::result::Result<T, Error>;
