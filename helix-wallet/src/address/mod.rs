//! Address encoding
//!
//! Turns a derived key pair into a chain's native address string, plus the
//! scannable payload and QR rendering used by receive flows. Dispatch is a
//! closed match over the descriptor's network parameters; no chain symbol
//! is ever inspected here.

mod evm;
mod utxo;
mod privacy;

use qrcode::render::svg;
use qrcode::QrCode;

use crate::crypto::keys::KeyPair;
use crate::error::{Error, Result};
use crate::registry::{AddressFamily, ChainDescriptor, Network};

/// Encode a key pair as the chain's native address string
pub fn encode(key_pair: &KeyPair, chain: &ChainDescriptor) -> Result<String> {
    match chain.network {
        Network::Evm => evm::encode(key_pair.public_key()),
        Network::Utxo { version_byte } => utxo::encode(key_pair.public_key(), version_byte),
        Network::Privacy { prefix_byte } => privacy::encode(key_pair.public_key(), prefix_byte),
    }
}

/// Build the scannable (QR) payload for an address
///
/// EVM chains use an `ethereum:` URI, with the chain id appended for
/// non-mainnet chains (EIP-681); other families scan the bare address.
pub fn scannable_payload(address: &str, chain: &ChainDescriptor) -> String {
    match chain.family {
        AddressFamily::Evm => match chain.chain_id {
            Some(id) if id != 1 => format!("ethereum:{}@{}", address, id),
            _ => format!("ethereum:{}", address),
        },
        _ => address.to_string(),
    }
}

/// Render a scannable payload as an SVG QR code
pub fn qr_svg(payload: &str) -> Result<String> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| Error::AddressEncoding(format!("QR encoding failed: {}", e)))?;

    Ok(code
        .render()
        .min_dimensions(240, 240)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

/// Sanity-check an address string for a given family
///
/// Shape and checksum only; this does not prove the address belongs to any
/// particular key.
pub fn validate_address(address: &str, family: AddressFamily) -> bool {
    match family {
        AddressFamily::Evm => {
            if !address.starts_with("0x") || address.len() != 42 {
                return false;
            }
            matches!(hex::decode(&address[2..]), Ok(bytes) if bytes.len() == 20)
        }
        AddressFamily::Utxo => match bs58::decode(address).into_vec() {
            Ok(bytes) if bytes.len() == 25 => utxo::verify_checksum(&bytes),
            _ => false,
        },
        AddressFamily::SimplifiedPrivacyCoin => match bs58::decode(address).into_vec() {
            Ok(bytes) if bytes.len() == 37 => privacy::verify_checksum(&bytes),
            _ => false,
        },
    }
}
