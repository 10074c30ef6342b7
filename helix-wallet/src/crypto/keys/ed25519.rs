//! SLIP-0010-style derivation over ed25519
//!
//! Used by the simplified privacy-coin family. Ed25519 has no normal
//! (non-hardened) child derivation, so every path component must be
//! hardened.

use ed25519_dalek::{SigningKey, VerifyingKey};
use hmac::{Hmac, Mac};
use hmac::digest::KeyInit;
use sha2::Sha512;

use crate::error::{Error, Result};
use crate::registry::AddressFamily;
use super::derivation::{KeyPair, PrivateKey, PublicKey, HARDENED_OFFSET};

/// Derive an ed25519 key pair by walking a parsed derivation path
pub(crate) fn derive_key_pair(seed: &[u8], components: &[u32]) -> Result<KeyPair> {
    for &component in components {
        if component < HARDENED_OFFSET {
            return Err(Error::UnsupportedPath(
                "ed25519 derivation requires hardened path components".to_string(),
            ));
        }
    }

    let (mut secret_key, mut chain_code) = derive_master_key(seed)?;

    for &component in components {
        (secret_key, chain_code) = derive_child_key(secret_key, chain_code, component)?;
    }

    key_pair_from_secret(&secret_key)
}

/// Build a key pair from 32 secret bytes
pub(crate) fn key_pair_from_secret(secret: &[u8; 32]) -> Result<KeyPair> {
    let signing_key = SigningKey::from_bytes(secret);
    let verifying_key = VerifyingKey::from(&signing_key);

    let private_key = PrivateKey::new(
        signing_key.to_bytes().to_vec(),
        AddressFamily::SimplifiedPrivacyCoin,
    );
    let public_key = PublicKey::new(
        verifying_key.to_bytes().to_vec(),
        AddressFamily::SimplifiedPrivacyCoin,
    );

    KeyPair::new(private_key, public_key)
}

/// Derive the master key from a seed
fn derive_master_key(seed: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(b"ed25519 seed")
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(seed);
    let result = hmac.finalize().into_bytes();

    let mut secret_key = [0u8; 32];
    let mut chain_code = [0u8; 32];

    secret_key.copy_from_slice(&result[0..32]);
    chain_code.copy_from_slice(&result[32..64]);

    Ok((secret_key, chain_code))
}

/// Derive a hardened child key from a parent key
fn derive_child_key(
    parent_key: [u8; 32],
    parent_chain_code: [u8; 32],
    index: u32,
) -> Result<([u8; 32], [u8; 32])> {
    let mut data = Vec::with_capacity(37);
    data.push(0);
    data.extend_from_slice(&parent_key);
    data.extend_from_slice(&index.to_be_bytes());

    let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(&parent_chain_code)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(&data);
    let result = hmac.finalize().into_bytes();

    let mut child_key = [0u8; 32];
    let mut child_chain_code = [0u8; 32];

    child_key.copy_from_slice(&result[0..32]);
    child_chain_code.copy_from_slice(&result[32..64]);

    Ok((child_key, child_chain_code))
}
