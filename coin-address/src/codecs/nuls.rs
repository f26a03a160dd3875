//! NULS addresses: chain id, address type and key hash, closed by an XOR
//! byte, all Base58 encoded.

use super::base58::decode_plain;
use super::{AddressCodec, Family};
use crate::address::CanonicalAddress;
use crate::types::Hash160;
use crate::AddressError;

/// Mainnet chain id 8964, little endian.
pub const NULS_CHAIN_ID: [u8; 2] = 8964u16.to_le_bytes();
/// Ordinary account address type.
pub const NULS_ADDRESS_TYPE: u8 = 0x01;

const HEADER_LEN: usize = 3;
const DECODED_LEN: usize = HEADER_LEN + Hash160::LEN + 1;

fn xor_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

pub(crate) fn encode(hash: &Hash160) -> String {
    let mut bytes = Vec::with_capacity(DECODED_LEN);
    bytes.extend_from_slice(&NULS_CHAIN_ID);
    bytes.push(NULS_ADDRESS_TYPE);
    bytes.extend_from_slice(hash.as_bytes());
    bytes.push(xor_checksum(&bytes));
    bs58::encode(bytes).into_string()
}

/// NULS mainnet accounts (`Ns...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NulsCodec;

impl AddressCodec for NulsCodec {
    fn family(&self) -> Family {
        Family::Nuls
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::Nuls;
        let bytes = decode_plain(input, bs58::Alphabet::BITCOIN, family)?;
        if bytes.len() != DECODED_LEN {
            return Err(family.not_applicable());
        }
        let (payload, check) = bytes.split_at(DECODED_LEN - 1);
        if xor_checksum(payload) != check[0] {
            return Err(family.checksum_mismatch());
        }
        if payload[..2] != NULS_CHAIN_ID || payload[2] != NULS_ADDRESS_TYPE {
            return Err(family.not_applicable());
        }
        Ok(CanonicalAddress::Nuls(Hash160::try_from(&payload[HEADER_LEN..])?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let input = "NsdypXzHAMzVwCZUyL3DxxYy4zprwJbW";
        let addr = NulsCodec.decode(input).unwrap();
        match &addr {
            CanonicalAddress::Nuls(hash) => {
                assert_eq!(hash.to_hex(), "5cb3839cef68f8b5650461fe707311e2919c73b9")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(addr.to_string(), input);
    }

    #[test]
    fn test_chain_id_bytes() {
        assert_eq!(NULS_CHAIN_ID, [0x04, 0x23]);
    }

    #[test]
    fn test_rejections() {
        let mut bytes = bs58::decode("NsdtBWX2nMk65QeDp72XJ29R76o33uR3").into_vec().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        assert_eq!(
            NulsCodec.decode(&bs58::encode(&bytes).into_string()),
            Err(AddressError::ChecksumMismatch { family: Family::Nuls })
        );
        assert!(NulsCodec.decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").is_err());
        assert!(NulsCodec.decode("").is_err());
    }
}
