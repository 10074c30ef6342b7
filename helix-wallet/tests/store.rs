//! Tests for the wallet store lifecycle

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use helix_wallet::error::{Error, Result};
use helix_wallet::registry::list_supported;
use helix_wallet::signer::ExternalSigner;
use helix_wallet::store::{Lifecycle, WalletStore};

const VECTOR: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

struct MockSigner {
    address: &'static str,
}

#[async_trait]
impl ExternalSigner for MockSigner {
    async fn connect(&self) -> Result<String> {
        Ok(self.address.to_string())
    }
}

struct SlowSigner;

#[async_trait]
impl ExternalSigner for SlowSigner {
    async fn connect(&self) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("0x9858EfFD232B4033E47d90003D41EC34EcaEda94".to_string())
    }
}

struct UnavailableSigner;

#[async_trait]
impl ExternalSigner for UnavailableSigner {
    async fn connect(&self) -> Result<String> {
        Err(Error::NoSignerAvailable("no provider injected".to_string()))
    }
}

#[test]
fn test_generate_advances_one_chain_only() {
    let store = WalletStore::new();
    store.initialize_from_mnemonic(VECTOR).unwrap();

    let generated = store.generate_new_address("BTC").unwrap();
    assert_eq!(generated.index, 1);
    assert_eq!(generated.address, "1Ak8PffB2meyfYnbXZR9EGfLfFZVpzJvQP");

    // BTC advanced, ETH did not
    assert_eq!(store.current_address("BTC").unwrap().index, 1);
    assert_eq!(store.current_address("ETH").unwrap().index, 0);
}

#[test]
fn test_index_density_after_many_generates() {
    let store = WalletStore::new();
    store.initialize_from_mnemonic(VECTOR).unwrap();

    for _ in 0..5 {
        store.generate_new_address("ETH").unwrap();
    }

    let addresses = store.all_addresses("ETH");
    assert_eq!(addresses.len(), 6);
    for (i, entry) in addresses.iter().enumerate() {
        assert_eq!(entry.index, i as u32);
    }
    assert_eq!(store.current_address("ETH").unwrap().index, 5);
}

#[test]
fn test_concurrent_generates_never_collide() {
    let store = Arc::new(WalletStore::new());
    store.initialize_from_mnemonic(VECTOR).unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        handles.push(std::thread::spawn(move || {
            store.generate_new_address("ETH").unwrap().index
        }));
    }

    let mut indices: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    indices.sort_unstable();

    // Eight concurrent calls, eight distinct consecutive indices
    assert_eq!(indices, (1..=8).collect::<Vec<u32>>());
    assert_eq!(store.all_addresses("ETH").len(), 9);
}

#[test]
fn test_import_scoping() {
    let store = WalletStore::new();
    store
        .initialize_from_private_key(&[0x11u8; 32], "BTC")
        .unwrap();

    assert_eq!(store.all_addresses("BTC").len(), 1);
    assert!(store.all_addresses("ETH").is_empty());
    assert!(store.current_address("ETH").is_none());
}

#[test]
fn test_import_rejects_malformed_key() {
    let store = WalletStore::new();

    assert!(matches!(
        store.initialize_from_private_key(&[0u8; 32], "ETH"),
        Err(Error::InvalidKeyFormat(_))
    ));
    assert!(matches!(
        store.initialize_from_private_key_hex("0xzz", "ETH"),
        Err(Error::InvalidKeyFormat(_))
    ));
    assert_eq!(store.lifecycle(), Lifecycle::Uninitialized);
}

#[test]
fn test_hex_import_matches_raw_import() {
    let raw_store = WalletStore::new();
    raw_store
        .initialize_from_private_key(&[0x11u8; 32], "ETH")
        .unwrap();

    let hex_store = WalletStore::new();
    hex_store
        .initialize_from_private_key_hex(&format!("0x{}", "11".repeat(32)), "ETH")
        .unwrap();

    assert_eq!(
        raw_store.current_address("ETH").unwrap().address,
        hex_store.current_address("ETH").unwrap().address
    );
}

#[test]
fn test_same_mnemonic_two_stores_agree() {
    let first = WalletStore::new();
    let second = WalletStore::new();
    first.initialize_from_mnemonic(VECTOR).unwrap();
    second.initialize_from_mnemonic(VECTOR).unwrap();

    for symbol in list_supported() {
        assert_eq!(
            first.current_address(symbol).unwrap().address,
            second.current_address(symbol).unwrap().address
        );
    }
}

#[tokio::test]
async fn test_external_signer_populates_evm_chains_without_keys() {
    let store = WalletStore::new();
    let signer = MockSigner {
        address: "0x9858EfFD232B4033E47d90003D41EC34EcaEda94",
    };

    store
        .initialize_from_external_signer(&signer, Duration::from_secs(1))
        .await
        .unwrap();

    for symbol in ["ETH", "ALT"] {
        let current = store.current_address(symbol).unwrap();
        assert_eq!(current.address, signer.address);
        assert!(!current.has_private_key());
        assert!(current.public_key.is_none());
        assert!(current.derivation_path.is_none());
    }

    // Non-EVM chains stay empty under a signer root
    assert!(store.all_addresses("BTC").is_empty());
    assert!(store.all_addresses("XMR").is_empty());

    // And the sequence cannot be extended locally
    assert!(matches!(
        store.generate_new_address("ETH"),
        Err(Error::NotSupported(_))
    ));
}

#[tokio::test]
async fn test_signer_timeout_leaves_store_uninitialized() {
    let store = WalletStore::new();

    let err = store
        .initialize_from_external_signer(&SlowSigner, Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SignerTimeout(_)));
    assert_eq!(store.lifecycle(), Lifecycle::Uninitialized);
    assert!(store.all_addresses("ETH").is_empty());
}

#[tokio::test]
async fn test_unavailable_signer_leaves_store_uninitialized() {
    let store = WalletStore::new();

    let err = store
        .initialize_from_external_signer(&UnavailableSigner, Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoSignerAvailable(_)));
    assert_eq!(store.lifecycle(), Lifecycle::Uninitialized);
}

#[test]
fn test_clear_erases_key_material_and_allows_reinit() {
    let store = WalletStore::new();
    store.initialize_from_mnemonic(VECTOR).unwrap();
    let before = store.current_address("ETH").unwrap();

    store.clear();
    assert_eq!(store.lifecycle(), Lifecycle::Cleared);
    assert!(store.current_address("ETH").is_none());

    // The UI's copy survives the clear
    assert!(before.has_private_key());

    // Re-initialization behaves like a fresh store and reproduces the
    // same deterministic addresses
    store.initialize_from_mnemonic(VECTOR).unwrap();
    assert_eq!(store.current_address("ETH").unwrap().address, before.address);
}
