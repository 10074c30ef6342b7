//! Common key derivation functionality

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::registry::{AddressFamily, ChainDescriptor};

/// First hardened child number in a BIP-32 path
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A private key scoped to one address family
#[derive(Clone)]
pub struct PrivateKey {
    /// The raw private key bytes, zeroized on drop
    bytes: Zeroizing<Vec<u8>>,
    /// The address family the key belongs to
    family: AddressFamily,
}

impl PrivateKey {
    /// Create a new private key from bytes
    pub fn new(bytes: Vec<u8>, family: AddressFamily) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
            family,
        }
    }

    /// Get the raw private key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the address family
    pub fn family(&self) -> AddressFamily {
        self.family
    }
}

// Key bytes stay out of debug output
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

/// A public key scoped to one address family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// The raw public key bytes
    bytes: Vec<u8>,
    /// The address family the key belongs to
    family: AddressFamily,
}

impl PublicKey {
    /// Create a new public key from bytes
    pub fn new(bytes: Vec<u8>, family: AddressFamily) -> Self {
        Self { bytes, family }
    }

    /// Get the raw public key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the address family
    pub fn family(&self) -> AddressFamily {
        self.family
    }
}

/// A key pair for one address family
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// The private key
    private_key: PrivateKey,
    /// The public key
    public_key: PublicKey,
}

impl KeyPair {
    /// Create a new key pair
    pub fn new(private_key: PrivateKey, public_key: PublicKey) -> Result<Self> {
        if private_key.family() != public_key.family() {
            return Err(Error::KeyDerivation("Address family mismatch".to_string()));
        }
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Get the private key
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Get the public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Get the address family
    pub fn family(&self) -> AddressFamily {
        self.private_key.family()
    }
}

/// Derive the key pair at `index` of a chain's path template
///
/// Deterministic: identical `(seed, template, index)` inputs always yield
/// the identical pair, across process restarts and address families.
pub fn derive_from_seed(seed: &[u8], chain: &ChainDescriptor, index: u32) -> Result<KeyPair> {
    if seed.len() != 64 {
        return Err(Error::InvalidSeed(format!(
            "expected 64 bytes, got {}",
            seed.len()
        )));
    }
    // The index lands in a single path component; the hardened bit is not
    // part of the caller-visible index space.
    if index >= HARDENED_OFFSET {
        return Err(Error::DerivationOverflow(index));
    }

    let path = chain.derivation_path(index);
    let components = parse_derivation_path(&path)?;

    match chain.family {
        AddressFamily::Evm | AddressFamily::Utxo => {
            super::secp256k1::derive_key_pair(seed, &components, chain.family)
        }
        AddressFamily::SimplifiedPrivacyCoin => super::ed25519::derive_key_pair(seed, &components),
    }
}

/// Wrap an imported raw private key, without any derivation
pub fn from_raw_private_key(bytes: &[u8], family: AddressFamily) -> Result<KeyPair> {
    if bytes.len() != 32 {
        return Err(Error::InvalidKeyFormat(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }

    match family {
        AddressFamily::Evm | AddressFamily::Utxo => {
            let secret_key = ::secp256k1::SecretKey::from_slice(bytes)
                .map_err(|e| Error::InvalidKeyFormat(format!("invalid secp256k1 scalar: {}", e)))?;
            super::secp256k1::key_pair_from_secret(&secret_key, family)
        }
        AddressFamily::SimplifiedPrivacyCoin => {
            let mut secret = [0u8; 32];
            secret.copy_from_slice(bytes);
            super::ed25519::key_pair_from_secret(&secret)
        }
    }
}

/// Parse a BIP-32 derivation path into child numbers
pub(crate) fn parse_derivation_path(path: &str) -> Result<Vec<u32>> {
    if !path.starts_with("m/") {
        return Err(Error::UnsupportedPath(format!(
            "Invalid derivation path: {}",
            path
        )));
    }

    let components = path.trim_start_matches("m/").split('/');
    let mut result = Vec::new();

    for component in components {
        if component.is_empty() {
            continue;
        }

        let hardened = component.ends_with('\'');
        let raw = component.trim_end_matches('\'').parse::<u32>().map_err(|_| {
            Error::UnsupportedPath(format!("Invalid derivation path component: {}", component))
        })?;

        if raw >= HARDENED_OFFSET {
            return Err(Error::DerivationOverflow(raw));
        }

        result.push(if hardened { HARDENED_OFFSET + raw } else { raw });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::mnemonic::mnemonic_to_seed;
    use crate::registry::describe;

    const VECTOR: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_parse_derivation_path() {
        let components = parse_derivation_path("m/44'/60'/0'/0/3").unwrap();
        assert_eq!(
            components,
            vec![
                HARDENED_OFFSET + 44,
                HARDENED_OFFSET + 60,
                HARDENED_OFFSET,
                0,
                3
            ]
        );
    }

    #[test]
    fn test_parse_derivation_path_rejects_garbage() {
        assert!(matches!(
            parse_derivation_path("44'/60'/0'/0/0"),
            Err(Error::UnsupportedPath(_))
        ));
        assert!(matches!(
            parse_derivation_path("m/44'/x'/0'/0/0"),
            Err(Error::UnsupportedPath(_))
        ));
    }

    #[test]
    fn test_parse_derivation_path_overflow() {
        assert!(matches!(
            parse_derivation_path("m/44'/60'/0'/0/2147483648"),
            Err(Error::DerivationOverflow(_))
        ));
    }

    #[test]
    fn test_derive_index_overflow() {
        let seed = mnemonic_to_seed(VECTOR, None).unwrap();
        let eth = describe("ETH").unwrap();

        assert!(matches!(
            derive_from_seed(&seed, eth, HARDENED_OFFSET),
            Err(Error::DerivationOverflow(_))
        ));
    }

    #[test]
    fn test_derive_rejects_short_seed() {
        let eth = describe("ETH").unwrap();
        assert!(matches!(
            derive_from_seed(&[0u8; 32], eth, 0),
            Err(Error::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_raw_key_length_check() {
        assert!(matches!(
            from_raw_private_key(&[1u8; 31], AddressFamily::Evm),
            Err(Error::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn test_raw_key_rejects_zero_scalar() {
        // Zero is not a valid secp256k1 secret key
        assert!(matches!(
            from_raw_private_key(&[0u8; 32], AddressFamily::Evm),
            Err(Error::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn test_key_pair_family_mismatch() {
        let private_key = PrivateKey::new(vec![1u8; 32], AddressFamily::Evm);
        let public_key = PublicKey::new(vec![2u8; 33], AddressFamily::Utxo);
        assert!(KeyPair::new(private_key, public_key).is_err());
    }

    #[test]
    fn test_private_key_debug_redacts_bytes() {
        let private_key = PrivateKey::new(vec![0x42u8; 32], AddressFamily::Evm);
        let rendered = format!("{:?}", private_key);
        assert!(!rendered.contains("42, 42"));
        assert!(!rendered.contains("0x42"));
    }
}
