//! Key derivation and management
//!
//! This module provides functionality for deriving and managing keys for
//! the supported address families.

pub mod secp256k1;
pub mod ed25519;
mod derivation;

pub use derivation::*;
