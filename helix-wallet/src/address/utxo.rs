//! UTXO (P2PKH) address encoding
//!
//! Base58Check of the version byte followed by hash160 of the compressed
//! public key. Shared by Bitcoin, Litecoin and any other P2PKH chain in
//! the registry; only the version byte differs.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::crypto::keys::PublicKey;
use crate::error::{Error, Result};
use crate::registry::AddressFamily;

/// Encode a public key as a P2PKH address for the given version byte
pub(crate) fn encode(public_key: &PublicKey, version_byte: u8) -> Result<String> {
    if public_key.family() != AddressFamily::Utxo {
        return Err(Error::AddressEncoding("Not a UTXO public key".to_string()));
    }

    let bytes = public_key.as_bytes();

    // Compressed SEC1 point
    if bytes.len() != 33 {
        return Err(Error::AddressEncoding(
            "Invalid UTXO public key length".to_string(),
        ));
    }

    let sha = Sha256::digest(bytes);
    let hash160 = Ripemd160::digest(sha);

    let mut payload = Vec::with_capacity(25);
    payload.push(version_byte);
    payload.extend_from_slice(&hash160);

    let checksum = double_sha256(&payload);
    payload.extend_from_slice(&checksum[0..4]);

    Ok(bs58::encode(payload).into_string())
}

/// Verify the trailing 4-byte checksum of a decoded 25-byte address
pub(crate) fn verify_checksum(decoded: &[u8]) -> bool {
    let (body, checksum) = decoded.split_at(decoded.len() - 4);
    double_sha256(body)[0..4] == *checksum
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}
