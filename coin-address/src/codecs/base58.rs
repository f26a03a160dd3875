//! Base58Check codecs: Bitcoin-style legacy addresses and the single-network
//! account formats that reuse double-SHA256 Base58Check.

use bs58::decode::Error as Base58Error;

use super::{AddressCodec, Family};
use crate::address::{
    CanonicalAddress, HashAddress, LegacyAddress, ScriptKind, TezosAddress, TezosKind, ZCASH_LEAD,
};
use crate::registry::{ZCASHT_P2PKH, ZCASHT_P2SH};
use crate::types::Hash160;
use crate::AddressError;

/// Longest string any Base58 address format produces, with headroom.
/// Base58 decoding is quadratic, so longer inputs are refused up front.
pub(super) const MAX_BASE58_LEN: usize = 128;

/// Decode plain Base58 (no checksum).
pub(super) fn decode_plain(
    input: &str,
    alphabet: &'static bs58::Alphabet,
    family: Family,
) -> Result<Vec<u8>, AddressError> {
    if input.is_empty() || input.len() > MAX_BASE58_LEN {
        return Err(family.not_applicable());
    }
    bs58::decode(input)
        .with_alphabet(alphabet)
        .into_vec()
        .map_err(|_| family.not_applicable())
}

/// Decode Base58Check, returning the payload without its checksum.
pub(super) fn decode_check(
    input: &str,
    alphabet: &'static bs58::Alphabet,
    family: Family,
) -> Result<Vec<u8>, AddressError> {
    if input.is_empty() || input.len() > MAX_BASE58_LEN {
        return Err(family.not_applicable());
    }
    bs58::decode(input)
        .with_alphabet(alphabet)
        .with_check(None)
        .into_vec()
        .map_err(|err| match err {
            Base58Error::InvalidChecksum { .. } => family.checksum_mismatch(),
            _ => family.not_applicable(),
        })
}

/// Encode `payload` as Base58Check.
pub(crate) fn encode_check(payload: &[u8], alphabet: &'static bs58::Alphabet) -> String {
    bs58::encode(payload)
        .with_alphabet(alphabet)
        .with_check()
        .into_string()
}

fn hash_at(payload: &[u8], offset: usize, family: Family) -> Result<Hash160, AddressError> {
    payload
        .get(offset..)
        .and_then(|rest| Hash160::try_from(rest).ok())
        .ok_or_else(|| family.not_applicable())
}

/// Bitcoin-style `prefix || hash160` addresses with any version byte.
///
/// The prefix is handed back untouched; whether it belongs to the requesting
/// network is decided by the prefix registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCodec;

impl AddressCodec for LegacyCodec {
    fn family(&self) -> Family {
        Family::Legacy
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let payload = decode_check(input, bs58::Alphabet::BITCOIN, Family::Legacy)?;
        if payload.len() != 1 + Hash160::LEN {
            return Err(Family::Legacy.not_applicable());
        }
        Ok(CanonicalAddress::Legacy(LegacyAddress {
            prefix: payload[0],
            hash: hash_at(&payload, 1, Family::Legacy)?,
        }))
    }
}

/// A Base58Check account format with one fixed version byte.
///
/// Ontology, NEO, ARK, Ripple, Tron and Iocoin differ only in version byte,
/// alphabet and the address variant they produce.
pub struct VersionedCodec {
    family: Family,
    version: u8,
    alphabet: &'static bs58::Alphabet,
    wrap: fn(Hash160) -> CanonicalAddress,
}

impl VersionedCodec {
    pub const fn new(
        family: Family,
        version: u8,
        alphabet: &'static bs58::Alphabet,
        wrap: fn(Hash160) -> CanonicalAddress,
    ) -> Self {
        Self {
            family,
            version,
            alphabet,
            wrap,
        }
    }

    /// The version byte this codec requires.
    pub fn version(&self) -> u8 {
        self.version
    }
}

impl AddressCodec for VersionedCodec {
    fn family(&self) -> Family {
        self.family
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let payload = decode_check(input, self.alphabet, self.family)?;
        if payload.len() != 1 + Hash160::LEN || payload[0] != self.version {
            return Err(self.family.not_applicable());
        }
        Ok((self.wrap)(hash_at(&payload, 1, self.family)?))
    }
}

/// Tezos `tz1`/`tz2`/`tz3`/`KT1` addresses: three-byte prefix plus hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct TezosCodec;

impl AddressCodec for TezosCodec {
    fn family(&self) -> Family {
        Family::Tezos
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let payload = decode_check(input, bs58::Alphabet::BITCOIN, Family::Tezos)?;
        if payload.len() != 3 + Hash160::LEN {
            return Err(Family::Tezos.not_applicable());
        }
        let kind = TezosKind::ALL
            .into_iter()
            .find(|kind| kind.prefix() == payload[..3])
            .ok_or_else(|| Family::Tezos.not_applicable())?;
        Ok(CanonicalAddress::Tezos(TezosAddress {
            kind,
            hash: hash_at(&payload, 3, Family::Tezos)?,
        }))
    }
}

/// Zcash transparent addresses (`t1...`, `t3...`), shared by Zelcash.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZcashTransparentCodec;

impl AddressCodec for ZcashTransparentCodec {
    fn family(&self) -> Family {
        Family::ZcashTransparent
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::ZcashTransparent;
        let payload = decode_check(input, bs58::Alphabet::BITCOIN, family)?;
        if payload.len() != 2 + Hash160::LEN || payload[0] != ZCASH_LEAD {
            return Err(family.not_applicable());
        }
        let kind = match payload[1] {
            ZCASHT_P2PKH => ScriptKind::P2pkh,
            ZCASHT_P2SH => ScriptKind::P2sh,
            _ => return Err(family.not_applicable()),
        };
        Ok(CanonicalAddress::ZcashTransparent(HashAddress {
            kind,
            hash: hash_at(&payload, 2, family)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_hash() -> Hash160 {
        let mut bytes = [0u8; 20];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        Hash160::new(bytes)
    }

    #[test]
    fn test_legacy_bitcoin_genesis() {
        let addr = LegacyCodec.decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").unwrap();
        assert_eq!(addr.legacy_prefix(), Some(0x00));
        match &addr {
            CanonicalAddress::Legacy(legacy) => {
                assert_eq!(legacy.hash.to_hex(), "62e907b15cbf27d5425399ebf6f0fb50ebb88f18")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(addr.to_string(), "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
    }

    #[test]
    fn test_legacy_keeps_any_prefix() {
        let addr = LegacyCodec.decode("LKKHMBjCU89fyFNgSRprDoD8Jb25N8uWvd").unwrap();
        assert_eq!(addr.legacy_prefix(), Some(0x30));
        let addr = LegacyCodec.decode("7SVyqiBykMKdoNuuf1AehnVxASmtdfqsFF").unwrap();
        assert_eq!(addr.legacy_prefix(), Some(0x10));
    }

    #[test]
    fn test_legacy_rejections() {
        assert_eq!(
            LegacyCodec.decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb"),
            Err(AddressError::ChecksumMismatch {
                family: Family::Legacy
            })
        );
        assert!(matches!(
            LegacyCodec.decode("0OIl"),
            Err(AddressError::NotApplicable { .. })
        ));
        assert!(matches!(LegacyCodec.decode(""), Err(AddressError::NotApplicable { .. })));
        // Zcash t-address: valid Base58Check but 22 bytes.
        assert!(matches!(
            LegacyCodec.decode("t1RygJmrLdNGgi98gUgEJDTVaELTAYWoMBy"),
            Err(AddressError::NotApplicable { .. })
        ));
        let long = "1".repeat(MAX_BASE58_LEN + 1);
        assert!(matches!(LegacyCodec.decode(&long), Err(AddressError::NotApplicable { .. })));
    }

    #[test]
    fn test_versioned_codecs() {
        let iocoin = VersionedCodec::new(Family::Iocoin, 0x67, bs58::Alphabet::BITCOIN, CanonicalAddress::Iocoin);
        let addr = iocoin.decode("iSuTWA83X3drx63SnW9NthBPvLBxXYvZxi").unwrap();
        assert_eq!(addr, CanonicalAddress::Iocoin(counting_hash()));
        assert_eq!(addr.to_string(), "iSuTWA83X3drx63SnW9NthBPvLBxXYvZxi");
        assert_eq!(iocoin.version(), 0x67);

        // Right checksum, wrong version byte.
        assert!(matches!(
            iocoin.decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"),
            Err(AddressError::NotApplicable { family: Family::Iocoin })
        ));

        let ripple = VersionedCodec::new(Family::Ripple, 0x00, bs58::Alphabet::RIPPLE, CanonicalAddress::Ripple);
        let addr = ripple.decode("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh").unwrap();
        match addr {
            CanonicalAddress::Ripple(hash) => {
                assert_eq!(hash.to_hex(), "b5f762798a53d543a014caf8b297cff8f2f937e8")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            ripple.decode("raLnyR4PTuc5SgXGHqYA894a4eoKqoFwu").unwrap(),
            CanonicalAddress::Ripple(counting_hash())
        );
        // Bitcoin alphabet string is not a Ripple address.
        assert!(ripple.decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").is_err());
    }

    #[test]
    fn test_tezos_kinds() {
        let cases = [
            ("tz1Yju7jmmsaUiG9qQLoYv35v5pHgnWoLWbt", TezosKind::Tz1),
            ("tz28QZkJtASQaeeieppeZjx8iaFPUtPpBrZd", TezosKind::Tz2),
            ("tz3LRNhdn2ZwyH7255tuZhQWXw8uFiXNJRVw", TezosKind::Tz3),
            ("KT18g6ejmStajqDwZZ5ZwTfu1ZKzhYq5RboW", TezosKind::Kt1),
        ];
        for (input, expected) in cases {
            match TezosCodec.decode(input).unwrap() {
                CanonicalAddress::Tezos(addr) => assert_eq!(addr.kind, expected),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(TezosCodec.decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").is_err());
    }

    #[test]
    fn test_zcash_transparent() {
        match ZcashTransparentCodec.decode("t1RygJmrLdNGgi98gUgEJDTVaELTAYWoMBy").unwrap() {
            CanonicalAddress::ZcashTransparent(addr) => {
                assert_eq!(addr.kind, ScriptKind::P2pkh);
                assert_eq!(addr.hash.to_hex(), "58e71790e51ab7558c05a6067cfc4926aa8c44dd");
            }
            other => panic!("unexpected {:?}", other),
        }
        let p2sh = ZcashTransparentCodec.decode("t3Jex1rKwuh1bQFRrKpKGWDcDVZ8bbQuNrB").unwrap();
        assert_eq!(
            p2sh,
            CanonicalAddress::ZcashTransparent(HashAddress {
                kind: ScriptKind::P2sh,
                hash: counting_hash(),
            })
        );
        assert_eq!(p2sh.to_string(), "t3Jex1rKwuh1bQFRrKpKGWDcDVZ8bbQuNrB");
    }
}
