//! Nano account addresses.
//!
//! `nano_` (or legacy `xrb_`) followed by 52 characters holding four zero
//! bits and the 256-bit public key, then 8 characters of checksum: a 5-byte
//! BLAKE2b of the key, byte-reversed.

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;

use super::bits::{convert_bits, from_symbols, to_symbols};
use super::{AddressCodec, Family};
use crate::address::CanonicalAddress;
use crate::types::PublicKey32;
use crate::AddressError;

const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";
const PREFIXES: [&str; 2] = ["nano_", "xrb_"];
const KEY_CHARS: usize = 52;
const CHECKSUM_LEN: usize = 5;
const CHECKSUM_CHARS: usize = 8;

fn checksum(key: &[u8]) -> Option<[u8; CHECKSUM_LEN]> {
    let mut hasher = Blake2bVar::new(CHECKSUM_LEN).ok()?;
    hasher.update(key);
    let mut out = [0u8; CHECKSUM_LEN];
    hasher.finalize_variable(&mut out).ok()?;
    out.reverse();
    Some(out)
}

/// Split the 256-bit key into 52 symbols behind four leading zero bits.
fn key_to_symbols(key: &[u8; 32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(KEY_CHARS);
    let mut acc: u32 = 0;
    let mut bits: u32 = 4;
    for &byte in key {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 31) as u8);
        }
        acc &= (1 << bits) - 1;
    }
    out
}

fn symbols_to_key(symbols: &[u8]) -> Option<[u8; 32]> {
    let (first, rest) = symbols.split_first()?;
    // Only the low bit of the first symbol is key material.
    if *first > 1 || rest.len() != KEY_CHARS - 1 {
        return None;
    }
    let mut key = [0u8; 32];
    let mut acc: u32 = u32::from(*first);
    let mut bits: u32 = 1;
    let mut i = 0;
    for &symbol in rest {
        acc = (acc << 5) | u32::from(symbol);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            *key.get_mut(i)? = ((acc >> bits) & 0xff) as u8;
            i += 1;
        }
        acc &= (1 << bits) - 1;
    }
    (i == key.len()).then_some(key)
}

pub(crate) fn encode(key: &PublicKey32) -> String {
    let mut out = String::from(PREFIXES[0]);
    out.push_str(&from_symbols(&key_to_symbols(key.as_bytes()), ALPHABET));
    if let Some(check) = checksum(key.as_bytes()) {
        let symbols = convert_bits(&check, 8, 5, true).unwrap_or_default();
        out.push_str(&from_symbols(&symbols, ALPHABET));
    }
    out
}

/// Accepts both prefixes; renders with `nano_`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NanoCodec;

impl AddressCodec for NanoCodec {
    fn family(&self) -> Family {
        Family::Nano
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::Nano;
        let body = PREFIXES
            .iter()
            .find_map(|prefix| input.strip_prefix(prefix))
            .ok_or_else(|| family.not_applicable())?;
        if body.len() != KEY_CHARS + CHECKSUM_CHARS {
            return Err(family.not_applicable());
        }
        let symbols = to_symbols(body, ALPHABET).ok_or_else(|| family.not_applicable())?;
        let (key_symbols, check_symbols) = symbols.split_at(KEY_CHARS);
        let key = symbols_to_key(key_symbols).ok_or_else(|| family.not_applicable())?;
        let check =
            convert_bits(check_symbols, 5, 8, false).ok_or_else(|| family.not_applicable())?;

        match checksum(&key) {
            Some(expected) if expected[..] == check[..] => {
                Ok(CanonicalAddress::Nano(PublicKey32::new(key)))
            }
            _ => Err(family.checksum_mismatch()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";
    const GENESIS_KEY: &str = "e89208dd038fbb269987689621d52292ae9c35941a7484756ecced92a65093ba";

    #[test]
    fn test_genesis_account() {
        let addr = NanoCodec.decode(GENESIS).unwrap();
        match &addr {
            CanonicalAddress::Nano(key) => assert_eq!(key.to_hex(), GENESIS_KEY),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(addr.to_string(), GENESIS);
    }

    #[test]
    fn test_legacy_prefix() {
        let legacy = GENESIS.replacen("nano_", "xrb_", 1);
        assert_eq!(NanoCodec.decode(&legacy).unwrap(), NanoCodec.decode(GENESIS).unwrap());
    }

    #[test]
    fn test_zero_key() {
        let addr = CanonicalAddress::Nano(PublicKey32::new([0; 32]));
        assert_eq!(
            addr.to_string(),
            "nano_1111111111111111111111111111111111111111111111111111hifc8npp"
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            NanoCodec.decode("nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr4"),
            Err(AddressError::ChecksumMismatch { family: Family::Nano })
        );
        // Leading symbol carries more than one key bit.
        assert!(NanoCodec
            .decode("nano_5t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3")
            .is_err());
        assert!(NanoCodec.decode(&GENESIS.to_uppercase()).is_err());
        assert!(NanoCodec.decode("ban_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3").is_err());
        assert!(NanoCodec.decode("nano_").is_err());
    }
}
