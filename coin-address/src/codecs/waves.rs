//! Waves mainnet addresses.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use sha3::{Digest, Keccak256};

use super::base58::decode_plain;
use super::{AddressCodec, Family};
use crate::address::CanonicalAddress;
use crate::types::Hash160;
use crate::AddressError;

const ADDRESS_VERSION: u8 = 0x01;
/// Mainnet chain id byte (`W`).
const CHAIN_ID: u8 = b'W';
const CHECKSUM_LEN: usize = 4;
const PAYLOAD_LEN: usize = 2 + Hash160::LEN;

type Blake2b256 = Blake2b<U32>;

/// First four bytes of keccak256(blake2b256(payload)).
fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let secure = Keccak256::digest(Blake2b256::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&secure[..CHECKSUM_LEN]);
    out
}

pub(crate) fn encode(hash: &Hash160) -> String {
    let mut bytes = vec![ADDRESS_VERSION, CHAIN_ID];
    bytes.extend_from_slice(hash.as_bytes());
    let check = checksum(&bytes);
    bytes.extend_from_slice(&check);
    bs58::encode(bytes).into_string()
}

/// Version 1, chain `W`, a 20-byte public key hash and a 4-byte checksum.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavesCodec;

impl AddressCodec for WavesCodec {
    fn family(&self) -> Family {
        Family::Waves
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::Waves;
        let bytes = decode_plain(input, bs58::Alphabet::BITCOIN, family)?;
        if bytes.len() != PAYLOAD_LEN + CHECKSUM_LEN {
            return Err(family.not_applicable());
        }
        let (payload, check) = bytes.split_at(PAYLOAD_LEN);
        if &checksum(payload)[..] != check {
            return Err(family.checksum_mismatch());
        }
        if payload[0] != ADDRESS_VERSION || payload[1] != CHAIN_ID {
            return Err(family.not_applicable());
        }
        Ok(CanonicalAddress::Waves(Hash160::try_from(&payload[2..])?))
    }
}
