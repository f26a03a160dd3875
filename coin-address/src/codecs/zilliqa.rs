//! Zilliqa addresses, in either of two textual forms.
//!
//! A string starting with the literal `0x` is read as the raw key hash in
//! hex, with no checksum, and is never retried as bech32. Anything else must
//! be a `zil` bech32 string.

use super::cosmos::{decode_hash, encode_hash};
use super::{AddressCodec, Family};
use crate::address::CanonicalAddress;
use crate::types::Hash160;
use crate::AddressError;

const HRP: &str = "zil";
const HEX_MARKER: &str = "0x";

/// Bech32 for 20-byte key hashes, hex for anything else the hex form let in.
pub(crate) fn encode(key_hash: &[u8]) -> String {
    if key_hash.len() == Hash160::LEN {
        encode_hash(HRP, key_hash)
    } else {
        format!("{}{}", HEX_MARKER, hex::encode(key_hash))
    }
}

/// `zil1...` bech32, or `0x` hex which is never retried as bech32.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZilliqaCodec;

impl AddressCodec for ZilliqaCodec {
    fn family(&self) -> Family {
        Family::Zilliqa
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::Zilliqa;
        if let Some(digits) = input.strip_prefix(HEX_MARKER) {
            if digits.is_empty() {
                return Err(family.not_applicable());
            }
            let key_hash = hex::decode(digits).map_err(|_| family.not_applicable())?;
            return Ok(CanonicalAddress::Zilliqa(key_hash));
        }

        let (hrp, key_hash) = decode_hash(input, family)?;
        if hrp != HRP {
            return Err(family.not_applicable());
        }
        Ok(CanonicalAddress::Zilliqa(key_hash.as_bytes().to_vec()))
    }
}
