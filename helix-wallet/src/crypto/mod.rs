//! Cryptographic primitives and operations
//!
//! This module provides functionality for mnemonic handling and
//! hierarchical key derivation across the supported address families.

pub mod mnemonic;
pub mod keys;

pub use mnemonic::*;
pub use keys::*;
