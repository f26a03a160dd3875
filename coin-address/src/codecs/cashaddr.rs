//! Bitcoin Cash CashAddr.
//!
//! CashAddr shares the bech32 character set but not its checksum: the prefix
//! is expanded with the low five bits of each character only, and the
//! polymod runs over 40 bits with its own generators, producing eight
//! checksum symbols.

use bech32::Fe32;

use super::bits::convert_bits;
use super::{AddressCodec, Family};
use crate::address::{CanonicalAddress, HashAddress, ScriptKind};
use crate::types::Hash160;
use crate::AddressError;

/// Mainnet prefix; also implied when the input carries none.
pub const CASHADDR_PREFIX: &str = "bitcoincash";

const CHECKSUM_LEN: usize = 8;
const TYPE_P2PKH: u8 = 0x00;
const TYPE_P2SH: u8 = 0x08;

fn expand_prefix(prefix: &str) -> Vec<u8> {
    let mut out: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    out.push(0);
    out
}

fn polymod(values: &[u8]) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        for (i, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 == 1 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// Encode a hash as a prefixed mainnet CashAddr.
pub(crate) fn encode(kind: ScriptKind, hash: &Hash160) -> String {
    let version = match kind {
        ScriptKind::P2pkh => TYPE_P2PKH,
        ScriptKind::P2sh => TYPE_P2SH,
    };
    let mut payload = Vec::with_capacity(1 + Hash160::LEN);
    payload.push(version);
    payload.extend_from_slice(hash.as_bytes());
    // Regrouping 8-bit input into 5-bit words with padding cannot fail.
    let data = convert_bits(&payload, 8, 5, true).unwrap_or_default();

    let mut values = expand_prefix(CASHADDR_PREFIX);
    values.extend_from_slice(&data);
    values.extend_from_slice(&[0; CHECKSUM_LEN]);
    let checksum = polymod(&values);

    let mut out = String::with_capacity(CASHADDR_PREFIX.len() + 1 + data.len() + CHECKSUM_LEN);
    out.push_str(CASHADDR_PREFIX);
    out.push(':');
    for &d in &data {
        out.push(Fe32::try_from(d).map(Fe32::to_char).unwrap_or('q'));
    }
    for i in 0..CHECKSUM_LEN {
        let symbol = ((checksum >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8;
        out.push(Fe32::try_from(symbol).map(Fe32::to_char).unwrap_or('q'));
    }
    out
}

/// CashAddr with an optional `bitcoincash:` prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashAddrCodec;

impl AddressCodec for CashAddrCodec {
    fn family(&self) -> Family {
        Family::CashAddr
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::CashAddr;
        let has_lower = input.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = input.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(family.not_applicable());
        }
        let lower = input.to_ascii_lowercase();
        let payload = match lower.split_once(':') {
            Some((CASHADDR_PREFIX, payload)) => payload,
            Some(_) => return Err(family.not_applicable()),
            None => lower.as_str(),
        };

        // Version byte plus a 20-byte hash, then the checksum.
        const DATA_LEN: usize = (8 * (1 + Hash160::LEN) + 4) / 5;
        if payload.len() != DATA_LEN + CHECKSUM_LEN {
            return Err(family.not_applicable());
        }
        let symbols: Vec<u8> = payload
            .chars()
            .map(|c| Fe32::from_char(c).map(Fe32::to_u8))
            .collect::<Result<_, _>>()
            .map_err(|_| family.not_applicable())?;

        let mut values = expand_prefix(CASHADDR_PREFIX);
        values.extend_from_slice(&symbols);
        if polymod(&values) != 0 {
            return Err(family.checksum_mismatch());
        }

        let bytes = convert_bits(&symbols[..DATA_LEN], 5, 8, false)
            .ok_or_else(|| family.not_applicable())?;
        let (version, hash) = bytes.split_first().ok_or_else(|| family.not_applicable())?;
        let kind = match *version {
            TYPE_P2PKH => ScriptKind::P2pkh,
            TYPE_P2SH => ScriptKind::P2sh,
            // Reserved bit, other types or a non-160-bit size.
            _ => return Err(family.not_applicable()),
        };
        let hash = Hash160::try_from(hash).map_err(|_| family.not_applicable())?;
        Ok(CanonicalAddress::CashAddr(HashAddress { kind, hash }))
    }
}
