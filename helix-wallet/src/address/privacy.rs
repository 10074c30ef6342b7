//! Simplified privacy-coin address encoding
//!
//! Base58 of `prefix_byte || Keccak-256(public key) || checksum`. This is
//! a single-component reduction, NOT the real dual-key stealth-address
//! scheme, and the output is not wire-compatible with the live network.
//! An implementation targeting real interoperability must replace this
//! module with the actual spend-key/view-key construction.

use super::evm::keccak256;
use crate::crypto::keys::PublicKey;
use crate::error::{Error, Result};
use crate::registry::AddressFamily;

/// Encode a public key as a simplified privacy-coin address
pub(crate) fn encode(public_key: &PublicKey, prefix_byte: u8) -> Result<String> {
    if public_key.family() != AddressFamily::SimplifiedPrivacyCoin {
        return Err(Error::AddressEncoding(
            "Not a privacy-coin public key".to_string(),
        ));
    }

    let bytes = public_key.as_bytes();

    if bytes.len() != 32 {
        return Err(Error::AddressEncoding(
            "Invalid privacy-coin public key length".to_string(),
        ));
    }

    let mut payload = Vec::with_capacity(37);
    payload.push(prefix_byte);
    payload.extend_from_slice(&keccak256(bytes));

    let checksum = keccak256(&payload);
    payload.extend_from_slice(&checksum[0..4]);

    Ok(bs58::encode(payload).into_string())
}

/// Verify the trailing 4-byte checksum of a decoded 37-byte address
pub(crate) fn verify_checksum(decoded: &[u8]) -> bool {
    let (body, checksum) = decoded.split_at(decoded.len() - 4);
    keccak256(body)[0..4] == *checksum
}
