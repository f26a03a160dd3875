//! Groestlcoin legacy addresses: Bitcoin layout, Grøstl-512d checksum.

use groestl::{Digest, Groestl512};

use super::base58::decode_plain;
use super::{AddressCodec, Family};
use crate::address::{CanonicalAddress, LegacyAddress};
use crate::registry::{BITCOIN_P2SH, GROESTLCOIN_P2PKH};
use crate::types::Hash160;
use crate::AddressError;

const CHECKSUM_LEN: usize = 4;
const PAYLOAD_LEN: usize = 1 + Hash160::LEN;

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Groestl512::digest(Groestl512::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

pub(crate) fn encode(prefix: u8, hash: &Hash160) -> String {
    let mut bytes = Vec::with_capacity(PAYLOAD_LEN + CHECKSUM_LEN);
    bytes.push(prefix);
    bytes.extend_from_slice(hash.as_bytes());
    let check = checksum(&bytes);
    bytes.extend_from_slice(&check);
    bs58::encode(bytes).into_string()
}

/// Accepts the Groestlcoin P2PKH (`F...`) and P2SH (`3...`) prefixes only.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroestlLegacyCodec;

impl AddressCodec for GroestlLegacyCodec {
    fn family(&self) -> Family {
        Family::GroestlLegacy
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::GroestlLegacy;
        let bytes = decode_plain(input, bs58::Alphabet::BITCOIN, family)?;
        if bytes.len() != PAYLOAD_LEN + CHECKSUM_LEN {
            return Err(family.not_applicable());
        }
        let (payload, check) = bytes.split_at(PAYLOAD_LEN);
        if &checksum(payload)[..] != check {
            return Err(family.checksum_mismatch());
        }
        let prefix = payload[0];
        if prefix != GROESTLCOIN_P2PKH && prefix != BITCOIN_P2SH {
            return Err(family.not_applicable());
        }
        Ok(CanonicalAddress::Groestlcoin(LegacyAddress {
            prefix,
            hash: Hash160::try_from(&payload[1..])?,
        }))
    }
}
