//! Wallet store
//!
//! Process-wide address state with a strict init/use/clear lifecycle. The
//! store owns the root secret, one ordered address sequence per chain, and
//! the "current address" pointer the UI reads. Modeled as an explicit
//! struct so tests can construct isolated instances.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::address;
use crate::crypto::keys::{self, KeyPair, PrivateKey};
use crate::crypto::mnemonic::mnemonic_to_seed;
use crate::error::{Error, Result};
use crate::registry::{self, AddressFamily, ChainDescriptor};
use crate::signer::ExternalSigner;

/// Lifecycle states of the store
///
/// `Cleared` behaves like `Uninitialized` but is a distinct state for
/// audit purposes; re-initialization is allowed from either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Cleared,
}

/// One derived address, immutable once appended to a chain's sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedAddress {
    /// Chain the address belongs to
    pub chain_symbol: String,
    /// Position in the chain's dense, gapless sequence
    pub index: u32,
    /// The address in the chain's native format
    pub address: String,
    /// Hex-encoded public key; absent for external-signer addresses
    pub public_key: Option<String>,
    /// Private key material; absent for external-signer addresses.
    /// Never serialized.
    #[serde(skip)]
    private_key: Option<PrivateKey>,
    /// HD derivation path; absent for imported and external-signer
    /// addresses
    pub derivation_path: Option<String>,
}

impl DerivedAddress {
    /// Private key material for the signing layer
    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    /// Whether local private key material exists for this address
    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }
}

/// The single active source of key material
enum RootSecret {
    /// BIP-39 seed; derives addresses for every registered chain
    Seed(Zeroizing<Vec<u8>>),
    /// Imported raw key; scoped to the one chain it was imported for
    RawKey { symbol: &'static str },
    /// Out-of-process signer; EVM chains only, no local private key
    External,
}

/// Per-chain address sequence and current pointer
struct PerChainState {
    /// Dense sequence: `addresses[i].index == i`
    addresses: Vec<DerivedAddress>,
    /// Always a valid index into `addresses`
    current_index: usize,
}

impl PerChainState {
    fn with_first(entry: DerivedAddress) -> Self {
        Self {
            addresses: vec![entry],
            current_index: 0,
        }
    }
}

struct Inner {
    lifecycle: Lifecycle,
    root: Option<RootSecret>,
    chains: HashMap<&'static str, Mutex<PerChainState>>,
}

/// Multi-chain wallet store
///
/// Exactly one `initialize_from_*` call is valid per lifetime segment;
/// `clear()` ends the segment and zeroizes all key material.
pub struct WalletStore {
    inner: RwLock<Inner>,
}

impl WalletStore {
    /// Create an empty, uninitialized store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                lifecycle: Lifecycle::Uninitialized,
                root: None,
                chains: HashMap::new(),
            }),
        }
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        self.read().lifecycle
    }

    /// Initialize from a BIP-39 mnemonic phrase
    ///
    /// Derives index 0 for every registered chain. On failure the store is
    /// left untouched.
    pub fn initialize_from_mnemonic(&self, phrase: &str) -> Result<()> {
        self.initialize_from_mnemonic_with_passphrase(phrase, None)
    }

    /// Initialize from a mnemonic with an optional BIP-39 passphrase
    pub fn initialize_from_mnemonic_with_passphrase(
        &self,
        phrase: &str,
        passphrase: Option<&str>,
    ) -> Result<()> {
        let mut inner = self.write();
        ensure_uninitialized(&inner)?;

        let seed = mnemonic_to_seed(phrase, passphrase)?;

        let mut chains = HashMap::new();
        for chain in registry::all() {
            let entry = derive_entry(&seed, chain, 0)?;
            chains.insert(chain.symbol, Mutex::new(PerChainState::with_first(entry)));
        }

        inner.chains = chains;
        inner.root = Some(RootSecret::Seed(seed));
        inner.lifecycle = Lifecycle::Initialized;

        info!(
            chains = registry::list_supported().len(),
            "wallet initialized from mnemonic"
        );
        Ok(())
    }

    /// Initialize from a raw private key, scoped to a single chain
    pub fn initialize_from_private_key(&self, key: &[u8], symbol: &str) -> Result<()> {
        let mut inner = self.write();
        ensure_uninitialized(&inner)?;

        let chain = registry::describe(symbol)?;
        let key_pair = keys::from_raw_private_key(key, chain.family)?;
        let entry = entry_from_key_pair(&key_pair, chain, 0, None)?;

        let mut chains = HashMap::new();
        chains.insert(chain.symbol, Mutex::new(PerChainState::with_first(entry)));

        inner.chains = chains;
        inner.root = Some(RootSecret::RawKey {
            symbol: chain.symbol,
        });
        inner.lifecycle = Lifecycle::Initialized;

        info!(chain = chain.symbol, "wallet initialized from private key");
        Ok(())
    }

    /// Initialize from a hex-encoded private key (`0x` prefix tolerated)
    pub fn initialize_from_private_key_hex(&self, key: &str, symbol: &str) -> Result<()> {
        let trimmed = key.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = Zeroizing::new(
            hex::decode(trimmed).map_err(|e| Error::InvalidKeyFormat(format!("invalid hex: {}", e)))?,
        );
        self.initialize_from_private_key(&bytes, symbol)
    }

    /// Initialize from an external signer, bounded by `timeout`
    ///
    /// On success every EVM-family chain gets the signer's address at
    /// index 0, with no local key material. On timeout or signer failure
    /// the store stays uninitialized.
    pub async fn initialize_from_external_signer(
        &self,
        signer: &dyn ExternalSigner,
        timeout: Duration,
    ) -> Result<()> {
        ensure_uninitialized(&self.read())?;

        // The handshake runs without the store lock held; state is only
        // touched after the signer answered.
        let account = tokio::time::timeout(timeout, signer.connect())
            .await
            .map_err(|_| Error::SignerTimeout(timeout))??;

        if !address::validate_address(&account, AddressFamily::Evm) {
            return Err(Error::NoSignerAvailable(format!(
                "signer returned a malformed address: {}",
                account
            )));
        }

        let mut inner = self.write();
        ensure_uninitialized(&inner)?;

        let mut chains = HashMap::new();
        for chain in registry::all().filter(|c| c.family == AddressFamily::Evm) {
            let entry = DerivedAddress {
                chain_symbol: chain.symbol.to_string(),
                index: 0,
                address: account.clone(),
                public_key: None,
                private_key: None,
                derivation_path: None,
            };
            chains.insert(chain.symbol, Mutex::new(PerChainState::with_first(entry)));
        }

        inner.chains = chains;
        inner.root = Some(RootSecret::External);
        inner.lifecycle = Lifecycle::Initialized;

        info!(address = %account, "wallet initialized from external signer");
        Ok(())
    }

    /// Append the next address for a chain and advance the current pointer
    ///
    /// Serialized per chain: index assignment, derivation and append all
    /// happen under the chain's lock, so concurrent calls can neither
    /// duplicate nor skip an index.
    pub fn generate_new_address(&self, symbol: &str) -> Result<DerivedAddress> {
        let inner = self.read();

        if inner.lifecycle != Lifecycle::Initialized {
            return Err(Error::NoRootSecret);
        }

        let chain = registry::describe(symbol)?;

        let seed = match inner.root.as_ref().ok_or(Error::NoRootSecret)? {
            RootSecret::Seed(seed) => seed,
            RootSecret::RawKey { .. } => {
                return Err(Error::NotSupported(
                    "imported-key wallets hold a single fixed address".to_string(),
                ))
            }
            RootSecret::External => {
                return Err(Error::NotSupported(
                    "external-signer wallets hold a single fixed address".to_string(),
                ))
            }
        };

        let state = inner
            .chains
            .get(chain.symbol)
            .ok_or_else(|| Error::UnsupportedChain(symbol.to_string()))?;
        let mut state = state.lock().expect("wallet store chain lock poisoned");

        let index = state.addresses.len() as u32;
        let entry = derive_entry(seed, chain, index)?;

        state.addresses.push(entry.clone());
        state.current_index = state.addresses.len() - 1;

        debug!(chain = chain.symbol, index, "generated new address");
        Ok(entry)
    }

    /// The chain's current address, if any
    pub fn current_address(&self, symbol: &str) -> Option<DerivedAddress> {
        let inner = self.read();
        let state = inner.chains.get(symbol)?;
        let state = state.lock().expect("wallet store chain lock poisoned");
        state.addresses.get(state.current_index).cloned()
    }

    /// All addresses generated for a chain, in index order
    pub fn all_addresses(&self, symbol: &str) -> Vec<DerivedAddress> {
        let inner = self.read();
        inner
            .chains
            .get(symbol)
            .map(|state| {
                state
                    .lock()
                    .expect("wallet store chain lock poisoned")
                    .addresses
                    .clone()
            })
            .unwrap_or_default()
    }

    /// Erase the root secret and all derived private key material
    ///
    /// Addresses already handed to the UI are the UI's copies and are not
    /// affected. Valid in any state; never errors.
    pub fn clear(&self) {
        let mut inner = self.write();

        // Zeroizing buffers wipe on drop
        inner.root = None;
        let chains = std::mem::take(&mut inner.chains);
        drop(chains);

        inner.lifecycle = Lifecycle::Cleared;
        info!("wallet store cleared");
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("wallet store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("wallet store lock poisoned")
    }
}

impl Default for WalletStore {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_uninitialized(inner: &Inner) -> Result<()> {
    match inner.lifecycle {
        Lifecycle::Initialized => Err(Error::NotSupported(
            "store is already initialized; clear() it first".to_string(),
        )),
        Lifecycle::Uninitialized | Lifecycle::Cleared => Ok(()),
    }
}

/// Derive and encode the address at `index` for a chain
fn derive_entry(
    seed: &[u8],
    chain: &'static ChainDescriptor,
    index: u32,
) -> Result<DerivedAddress> {
    let key_pair = keys::derive_from_seed(seed, chain, index)?;
    entry_from_key_pair(&key_pair, chain, index, Some(chain.derivation_path(index)))
}

fn entry_from_key_pair(
    key_pair: &KeyPair,
    chain: &ChainDescriptor,
    index: u32,
    derivation_path: Option<String>,
) -> Result<DerivedAddress> {
    let address = address::encode(key_pair, chain)?;

    Ok(DerivedAddress {
        chain_symbol: chain.symbol.to_string(),
        index,
        address,
        public_key: Some(hex::encode(key_pair.public_key().as_bytes())),
        private_key: Some(key_pair.private_key().clone()),
        derivation_path,
    })
}
