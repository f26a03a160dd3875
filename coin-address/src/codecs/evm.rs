//! Hex account addresses: EVM chains (EIP-55), Wanchain, ICON, Aion and Semux.

use sha3::{Digest, Keccak256};

use super::{AddressCodec, Family};
use crate::address::{CanonicalAddress, IconAddress, IconKind};
use crate::types::{Hash160, PublicKey32};
use crate::AddressError;

const AION_IDENTIFIER: u8 = 0xa0;

/// Mixed-case checksum rule applied to a hex account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvmChecksum {
    /// EIP-55: a letter is uppercase when its keccak nibble is >= 8.
    Eip55,
    /// Wanchain: the EIP-55 casing inverted.
    Inverted,
}

/// Render `hash` as `0x`-prefixed hex with the checksum casing applied.
pub(crate) fn encode_evm(hash: &Hash160, checksum: EvmChecksum) -> String {
    let lower = hash.to_hex();
    let digest = Keccak256::digest(lower.as_bytes());
    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = digest[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        let upper = match checksum {
            EvmChecksum::Eip55 => nibble >= 8,
            EvmChecksum::Inverted => nibble < 8,
        };
        out.push(if upper { c.to_ascii_uppercase() } else { c });
    }
    out
}

fn decode_hex<const N: usize>(body: &str, family: Family) -> Result<[u8; N], AddressError> {
    if body.len() != 2 * N {
        return Err(family.not_applicable());
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(body, &mut out).map_err(|_| family.not_applicable())?;
    Ok(out)
}

/// `0x` + 40 hex characters, checksum enforced when the input mixes case.
pub struct EvmCodec {
    checksum: EvmChecksum,
}

impl EvmCodec {
    pub const fn new(checksum: EvmChecksum) -> Self {
        Self { checksum }
    }
}

impl AddressCodec for EvmCodec {
    fn family(&self) -> Family {
        match self.checksum {
            EvmChecksum::Eip55 => Family::Ethereum,
            EvmChecksum::Inverted => Family::Wanchain,
        }
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = self.family();
        let body = input.strip_prefix("0x").ok_or_else(|| family.not_applicable())?;
        let hash = Hash160::new(decode_hex(body, family)?);

        let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && encode_evm(&hash, self.checksum) != input {
            return Err(family.checksum_mismatch());
        }

        Ok(match self.checksum {
            EvmChecksum::Eip55 => CanonicalAddress::Ethereum(hash),
            EvmChecksum::Inverted => CanonicalAddress::Wanchain(hash),
        })
    }
}

/// ICON `hx` (account) and `cx` (contract) addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconCodec;

impl AddressCodec for IconCodec {
    fn family(&self) -> Family {
        Family::Icon
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let (kind, body) = if let Some(body) = input.strip_prefix("hx") {
            (IconKind::Account, body)
        } else if let Some(body) = input.strip_prefix("cx") {
            (IconKind::Contract, body)
        } else {
            return Err(Family::Icon.not_applicable());
        };
        let hash = Hash160::new(decode_hex(body, Family::Icon)?);
        Ok(CanonicalAddress::Icon(IconAddress { kind, hash }))
    }
}

/// Aion 32-byte accounts, `0x` optional, leading identifier byte `0xa0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AionCodec;

impl AddressCodec for AionCodec {
    fn family(&self) -> Family {
        Family::Aion
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let body = input.strip_prefix("0x").unwrap_or(input);
        let bytes: [u8; PublicKey32::LEN] = decode_hex(body, Family::Aion)?;
        if bytes[0] != AION_IDENTIFIER {
            return Err(Family::Aion.not_applicable());
        }
        Ok(CanonicalAddress::Aion(PublicKey32::new(bytes)))
    }
}

/// Semux `0x` + 40 hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemuxCodec;

impl AddressCodec for SemuxCodec {
    fn family(&self) -> Family {
        Family::Semux
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let body = input
            .strip_prefix("0x")
            .ok_or_else(|| Family::Semux.not_applicable())?;
        Ok(CanonicalAddress::Semux(Hash160::new(decode_hex(body, Family::Semux)?)))
    }
}
