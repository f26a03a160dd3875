//! Graphene-style public key addresses: BravoCoin, Steem and EOS.
//!
//! The body is Base58 of a 33-byte compressed key followed by the first four
//! bytes of its RIPEMD-160. EOS `PUB_K1_`/`PUB_R1_` keys hash the curve name
//! in after the key.

use ripemd::{Digest, Ripemd160};

use super::base58::decode_plain;
use super::{AddressCodec, Family};
use crate::address::{CanonicalAddress, EosAddress, EosKeyKind};
use crate::types::CompressedPublicKey;
use crate::AddressError;

const CHECKSUM_LEN: usize = 4;
const TESTNET_PREFIX: &str = "TST";

fn checksum(key: &[u8], suffix: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Ripemd160::new();
    hasher.update(key);
    hasher.update(suffix);
    let digest = hasher.finalize();
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

fn decode_key(body: &str, suffix: &[u8], family: Family) -> Result<CompressedPublicKey, AddressError> {
    let bytes = decode_plain(body, bs58::Alphabet::BITCOIN, family)?;
    if bytes.len() != CompressedPublicKey::LEN + CHECKSUM_LEN {
        return Err(family.not_applicable());
    }
    let (key, check) = bytes.split_at(CompressedPublicKey::LEN);
    if &checksum(key, suffix)[..] != check {
        return Err(family.checksum_mismatch());
    }
    CompressedPublicKey::try_from(key)
}

fn encode_key(prefix: &str, key: &CompressedPublicKey, suffix: &[u8]) -> String {
    let mut bytes = key.as_bytes().to_vec();
    bytes.extend_from_slice(&checksum(key.as_bytes(), suffix));
    format!("{}{}", prefix, bs58::encode(bytes).into_string())
}

/// Render a Graphene key under `prefix`.
pub(crate) fn encode_graphene(prefix: &str, key: &CompressedPublicKey) -> String {
    encode_key(prefix, key, b"")
}

pub(crate) fn encode_eos(kind: EosKeyKind, key: &CompressedPublicKey) -> String {
    match kind {
        EosKeyKind::Legacy => encode_key("EOS", key, b""),
        EosKeyKind::K1 => encode_key("PUB_K1_", key, b"K1"),
        EosKeyKind::R1 => encode_key("PUB_R1_", key, b"R1"),
    }
}

/// A Graphene chain with its own key prefix; the testnet `TST` prefix is
/// accepted as well.
pub struct GrapheneCodec {
    family: Family,
    prefix: &'static str,
    wrap: fn(CompressedPublicKey) -> CanonicalAddress,
}

impl GrapheneCodec {
    pub const fn new(
        family: Family,
        prefix: &'static str,
        wrap: fn(CompressedPublicKey) -> CanonicalAddress,
    ) -> Self {
        Self {
            family,
            prefix,
            wrap,
        }
    }
}

impl AddressCodec for GrapheneCodec {
    fn family(&self) -> Family {
        self.family
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let body = input
            .strip_prefix(self.prefix)
            .or_else(|| input.strip_prefix(TESTNET_PREFIX))
            .ok_or_else(|| self.family.not_applicable())?;
        Ok((self.wrap)(decode_key(body, b"", self.family)?))
    }
}

/// EOS public keys in legacy and `PUB_K1_`/`PUB_R1_` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct EosCodec;

impl AddressCodec for EosCodec {
    fn family(&self) -> Family {
        Family::Eos
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let (kind, body, suffix): (EosKeyKind, &str, &[u8]) =
            if let Some(body) = input.strip_prefix("PUB_K1_") {
                (EosKeyKind::K1, body, b"K1")
            } else if let Some(body) = input.strip_prefix("PUB_R1_") {
                (EosKeyKind::R1, body, b"R1")
            } else if let Some(body) = input.strip_prefix("EOS") {
                (EosKeyKind::Legacy, body, b"")
            } else {
                return Err(Family::Eos.not_applicable());
            };
        let key = decode_key(body, suffix, Family::Eos)?;
        Ok(CanonicalAddress::Eos(EosAddress { kind, key }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "02c0ded2bc1f1305fb0faac5e6c03ee3a1924234985427b6167ca569d13df435cf";
    const EOS_LEGACY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

    fn key() -> CompressedPublicKey {
        CompressedPublicKey::try_from(hex::decode(KEY_HEX).unwrap().as_slice()).unwrap()
    }

    #[test]
    fn test_eos_legacy() {
        let addr = EosCodec.decode(EOS_LEGACY).unwrap();
        assert_eq!(
            addr,
            CanonicalAddress::Eos(EosAddress {
                kind: EosKeyKind::Legacy,
                key: key(),
            })
        );
        assert_eq!(addr.to_string(), EOS_LEGACY);
    }

    #[test]
    fn test_eos_suffixed_checksums() {
        let k1 = "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63";
        let addr = EosCodec.decode(k1).unwrap();
        assert_eq!(addr.to_string(), k1);

        let r1 = "PUB_R1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5Bpuyty";
        match EosCodec.decode(r1).unwrap() {
            CanonicalAddress::Eos(eos) => assert_eq!(eos.kind, EosKeyKind::R1),
            other => panic!("unexpected {:?}", other),
        }

        // K1 body with the legacy checksum.
        assert_eq!(
            EosCodec.decode("PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"),
            Err(AddressError::ChecksumMismatch { family: Family::Eos })
        );
    }

    #[test]
    fn test_steem_and_bravo_prefixes() {
        let steem = GrapheneCodec::new(Family::Steem, "STM", CanonicalAddress::Steem);
        let bravo = GrapheneCodec::new(Family::Bravo, "BRV", CanonicalAddress::Bravo);
        let body = &EOS_LEGACY[3..];

        let addr = steem.decode(&format!("STM{}", body)).unwrap();
        assert_eq!(addr, CanonicalAddress::Steem(key()));
        assert_eq!(addr.to_string(), format!("STM{}", body));
        assert_eq!(steem.decode(&format!("TST{}", body)).unwrap(), addr);
        assert!(steem.decode(&format!("BRV{}", body)).is_err());

        let addr = bravo.decode(&format!("BRV{}", body)).unwrap();
        assert_eq!(addr.to_string(), format!("BRV{}", body));
        assert!(bravo.decode(EOS_LEGACY).is_err());
    }

    #[test]
    fn test_rejects_short_body() {
        assert!(matches!(
            EosCodec.decode("EOS6MRyAjQq8ud7hVNYcfnVPJqcVpsc"),
            Err(AddressError::NotApplicable { family: Family::Eos })
        ));
        assert!(EosCodec.decode("EOS").is_err());
    }
}
