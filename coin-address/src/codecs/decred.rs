//! Decred Base58 addresses: two-byte network prefix and a double BLAKE-256
//! checksum.

use blake_hash::{Blake256, Digest};

use super::base58::decode_plain;
use super::{AddressCodec, Family};
use crate::address::{CanonicalAddress, HashAddress, ScriptKind};
use crate::types::Hash160;
use crate::AddressError;

/// Mainnet secp256k1 pay-to-pubkey-hash (`Ds`).
pub const DECRED_P2PKH: [u8; 2] = [0x07, 0x3f];
/// Mainnet pay-to-script-hash (`Dc`).
pub const DECRED_P2SH: [u8; 2] = [0x07, 0x1a];

const CHECKSUM_LEN: usize = 4;
const PAYLOAD_LEN: usize = 2 + Hash160::LEN;

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Blake256::digest(&Blake256::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

pub(crate) fn encode(kind: ScriptKind, hash: &Hash160) -> String {
    let prefix = match kind {
        ScriptKind::P2pkh => DECRED_P2PKH,
        ScriptKind::P2sh => DECRED_P2SH,
    };
    let mut bytes = prefix.to_vec();
    bytes.extend_from_slice(hash.as_bytes());
    let check = checksum(&bytes);
    bytes.extend_from_slice(&check);
    bs58::encode(bytes).into_string()
}

/// Mainnet `Ds`/`Dc` addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecredCodec;

impl AddressCodec for DecredCodec {
    fn family(&self) -> Family {
        Family::Decred
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::Decred;
        let bytes = decode_plain(input, bs58::Alphabet::BITCOIN, family)?;
        if bytes.len() != PAYLOAD_LEN + CHECKSUM_LEN {
            return Err(family.not_applicable());
        }
        let (payload, check) = bytes.split_at(PAYLOAD_LEN);
        if &checksum(payload)[..] != check {
            return Err(family.checksum_mismatch());
        }
        let kind = match [payload[0], payload[1]] {
            DECRED_P2PKH => ScriptKind::P2pkh,
            DECRED_P2SH => ScriptKind::P2sh,
            _ => return Err(family.not_applicable()),
        };
        let hash = Hash160::try_from(&payload[2..])?;
        Ok(CanonicalAddress::Decred(HashAddress { kind, hash }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_p2pkh() {
        let input = "DsmcYVbP1Nmag2H4AS17UTvmWXmGeA7nLDx";
        let addr = DecredCodec.decode(input).unwrap();
        match &addr {
            CanonicalAddress::Decred(decred) => {
                assert_eq!(decred.kind, ScriptKind::P2pkh);
                assert_eq!(decred.hash.to_hex(), "e280cb6e66b96679aec288b1fbdbd4db08077a1b");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(addr.to_string(), input);
    }

    #[test]
    fn test_p2sh_roundtrip() {
        let input = "DcXYv9PK9BSLVWSA1m1NxXiycKT3hijUxd9";
        let addr = DecredCodec.decode(input).unwrap();
        assert!(matches!(
            addr,
            CanonicalAddress::Decred(HashAddress {
                kind: ScriptKind::P2sh,
                ..
            })
        ));
        assert_eq!(addr.to_string(), input);
    }

    #[test]
    fn test_checksum_is_double_blake256() {
        assert_eq!(
            hex::encode(Blake256::digest(b"")),
            "716f6e863f744b9ac22c97ec7b76ea5f5908bc5b2f67c61510bfc4751384ea7a"
        );
        let mut payload = DECRED_P2PKH.to_vec();
        payload.extend_from_slice(&[0u8; 20]);
        let twice = Blake256::digest(&Blake256::digest(&payload));
        assert_eq!(checksum(&payload)[..], twice[..CHECKSUM_LEN]);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            DecredCodec.decode("DsmcYVbP1Nmag2H4AS17UTvmWXmGeA7nLDy"),
            Err(AddressError::ChecksumMismatch {
                family: Family::Decred
            })
        );
        assert!(DecredCodec.decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").is_err());
    }
}
