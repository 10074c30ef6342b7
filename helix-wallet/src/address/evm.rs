//! EVM address encoding
//!
//! One format serves every EVM chain in the registry: the last 20 bytes of
//! the Keccak-256 hash of the uncompressed public key, rendered with
//! EIP-55 checksum casing.

use sha3::{Digest, Keccak256};

use crate::crypto::keys::PublicKey;
use crate::error::{Error, Result};
use crate::registry::AddressFamily;

/// Encode a public key as a checksummed EVM address
pub(crate) fn encode(public_key: &PublicKey) -> Result<String> {
    if public_key.family() != AddressFamily::Evm {
        return Err(Error::AddressEncoding("Not an EVM public key".to_string()));
    }

    let bytes = public_key.as_bytes();

    // Uncompressed SEC1 point: 0x04 tag plus two 32-byte coordinates
    if bytes.len() != 65 {
        return Err(Error::AddressEncoding(
            "Invalid EVM public key length".to_string(),
        ));
    }

    let key_hash = keccak256(&bytes[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&key_hash[12..]);

    Ok(to_checksum(&address))
}

/// Apply EIP-55 checksum casing to a 20-byte address
pub(crate) fn to_checksum(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");

    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };

        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Calculate the Keccak-256 hash of data
pub(crate) fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
