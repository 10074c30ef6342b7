//! External signer adapter
//!
//! Used when the root secret lives outside the process (a browser
//! extension or hardware device). The signer owns the private key; the
//! wallet only ever learns the account address.

use async_trait::async_trait;

use crate::error::Result;

/// Handle to an out-of-process signer
///
/// `connect` performs the signer's connection round-trip and returns the
/// account address. The store bounds the call with an explicit timeout;
/// implementations should return [`crate::Error::NoSignerAvailable`] when
/// no signer is reachable.
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Ask the signer for its account address
    async fn connect(&self) -> Result<String>;
}
