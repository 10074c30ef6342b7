//! BIP-32 derivation over secp256k1
//!
//! Shared by the EVM and UTXO address families; they differ only in how
//! the resulting public key is serialized.

use hmac::{Hmac, Mac};
use hmac::digest::KeyInit;
use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey};
use sha2::Sha512;

use crate::error::{Error, Result};
use crate::registry::AddressFamily;
use super::derivation::{KeyPair, PrivateKey, PublicKey, HARDENED_OFFSET};

/// Derive a secp256k1 key pair by walking a parsed derivation path
pub(crate) fn derive_key_pair(
    seed: &[u8],
    components: &[u32],
    family: AddressFamily,
) -> Result<KeyPair> {
    let (mut secret_key, mut chain_code) = derive_master_key(seed)?;

    for &component in components {
        (secret_key, chain_code) = derive_child_key(secret_key, chain_code, component)?;
    }

    let secret_key = SecretKey::from_slice(&secret_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid secret key: {}", e)))?;

    key_pair_from_secret(&secret_key, family)
}

/// Build a key pair from a validated secret key
pub(crate) fn key_pair_from_secret(
    secret_key: &SecretKey,
    family: AddressFamily,
) -> Result<KeyPair> {
    let secp = Secp256k1::new();
    let public_key = Secp256k1PublicKey::from_secret_key(&secp, secret_key);

    // EVM addresses hash the uncompressed point; P2PKH hashes the
    // compressed form.
    let serialized = match family {
        AddressFamily::Evm => public_key.serialize_uncompressed().to_vec(),
        AddressFamily::Utxo => public_key.serialize().to_vec(),
        AddressFamily::SimplifiedPrivacyCoin => {
            return Err(Error::KeyDerivation(
                "SimplifiedPrivacyCoin is not a secp256k1 family".to_string(),
            ))
        }
    };

    let private_key = PrivateKey::new(secret_key.secret_bytes().to_vec(), family);
    let public_key = PublicKey::new(serialized, family);

    KeyPair::new(private_key, public_key)
}

/// Derive the master key from a seed
fn derive_master_key(seed: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(b"Bitcoin seed")
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(seed);
    let result = hmac.finalize().into_bytes();

    let mut secret_key = [0u8; 32];
    let mut chain_code = [0u8; 32];

    secret_key.copy_from_slice(&result[0..32]);
    chain_code.copy_from_slice(&result[32..64]);

    Ok((secret_key, chain_code))
}

/// Derive a child key from a parent key
fn derive_child_key(
    parent_key: [u8; 32],
    parent_chain_code: [u8; 32],
    index: u32,
) -> Result<([u8; 32], [u8; 32])> {
    let secp = Secp256k1::new();
    let parent_secret_key = SecretKey::from_slice(&parent_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid parent key: {}", e)))?;

    let mut data = Vec::with_capacity(37);

    if index >= HARDENED_OFFSET {
        // Hardened derivation
        data.push(0);
        data.extend_from_slice(&parent_key);
    } else {
        // Normal derivation
        let parent_public_key = Secp256k1PublicKey::from_secret_key(&secp, &parent_secret_key);
        data.extend_from_slice(&parent_public_key.serialize());
    }

    // Append the index
    data.extend_from_slice(&index.to_be_bytes());

    let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(&parent_chain_code)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(&data);
    let result = hmac.finalize().into_bytes();

    let mut child_key = [0u8; 32];
    let mut child_chain_code = [0u8; 32];

    child_key.copy_from_slice(&result[0..32]);
    child_chain_code.copy_from_slice(&result[32..64]);

    // Add the parent key to the child key (mod n)
    let child_secret_key = SecretKey::from_slice(&child_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid child key: {}", e)))?;

    let child_secret_key = child_secret_key
        .add_tweak(&parent_secret_key.into())
        .map_err(|e| Error::KeyDerivation(format!("Key addition error: {}", e)))?;

    Ok((child_secret_key.secret_bytes(), child_chain_code))
}
