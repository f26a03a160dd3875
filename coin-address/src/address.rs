//! The canonical, checksum-verified address value.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::codecs::{
    encode_cashaddr, encode_check, encode_decred, encode_eos, encode_evm, encode_graphene,
    encode_groestl, encode_hash, encode_nano, encode_nimiq, encode_nuls, encode_segwit,
    encode_stellar, encode_waves, encode_zilliqa, EvmChecksum, Family,
};
use crate::types::{CompressedPublicKey, Hash160, PublicKey32};

/// Version byte shared by Ontology, NEO and ARK account addresses.
pub(crate) const ACCOUNT_VERSION_0X17: u8 = 0x17;
/// Ripple account version byte.
pub(crate) const RIPPLE_VERSION: u8 = 0x00;
/// Tron mainnet version byte.
pub(crate) const TRON_VERSION: u8 = 0x41;
/// Iocoin P2PKH version byte.
pub(crate) const IOCOIN_VERSION: u8 = 0x67;
/// Leading byte of every Zcash transparent prefix.
pub(crate) const ZCASH_LEAD: u8 = 0x1C;

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// Script role of a hash-carrying address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    /// Pay to public key hash.
    P2pkh,
    /// Pay to script hash.
    P2sh,
}

/// A Base58Check version byte followed by a 20-byte hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LegacyAddress {
    pub prefix: u8,
    pub hash: Hash160,
}

/// A BIP-173/350 witness program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SegwitAddress {
    /// Lowercase human-readable part.
    pub hrp: String,
    pub version: u8,
    #[serde(serialize_with = "serialize_hex")]
    pub program: Vec<u8>,
}

/// A bech32 string carrying a bare 20-byte key hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bech32Address {
    /// Lowercase human-readable part.
    pub hrp: String,
    pub key_hash: Hash160,
}

/// A 20-byte hash tagged with its script role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HashAddress {
    pub kind: ScriptKind,
    pub hash: Hash160,
}

/// ICON address kinds (`hx` accounts, `cx` contracts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Account,
    Contract,
}

impl IconKind {
    /// The two-letter address prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            IconKind::Account => "hx",
            IconKind::Contract => "cx",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IconAddress {
    pub kind: IconKind,
    pub hash: Hash160,
}

/// Tezos implicit (`tz1`, `tz2`, `tz3`) and originated (`KT1`) accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TezosKind {
    Tz1,
    Tz2,
    Tz3,
    Kt1,
}

impl TezosKind {
    pub const ALL: [TezosKind; 4] = [TezosKind::Tz1, TezosKind::Tz2, TezosKind::Tz3, TezosKind::Kt1];

    /// Three-byte Base58Check prefix.
    pub fn prefix(&self) -> [u8; 3] {
        match self {
            TezosKind::Tz1 => [6, 161, 159],
            TezosKind::Tz2 => [6, 161, 161],
            TezosKind::Tz3 => [6, 161, 164],
            TezosKind::Kt1 => [2, 90, 121],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TezosAddress {
    pub kind: TezosKind,
    pub hash: Hash160,
}

/// EOS public key encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EosKeyKind {
    /// `EOS...`, secp256k1.
    Legacy,
    /// `PUB_K1_...`, secp256k1.
    K1,
    /// `PUB_R1_...`, secp256r1.
    R1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EosAddress {
    pub kind: EosKeyKind,
    pub key: CompressedPublicKey,
}

/// A validated address for one network.
///
/// Values only come out of a checksum-verified decode, so there is no
/// `Deserialize`. `Display` renders the canonical text, which classifies back
/// to an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "format", content = "payload", rename_all = "camelCase")]
pub enum CanonicalAddress {
    Legacy(LegacyAddress),
    Segwit(SegwitAddress),
    Cosmos(Bech32Address),
    CashAddr(HashAddress),
    Ethereum(Hash160),
    Wanchain(Hash160),
    Icon(IconAddress),
    Ontology(Hash160),
    Ripple(Hash160),
    Tezos(TezosAddress),
    Tron(Hash160),
    ZcashTransparent(HashAddress),
    Nimiq(Hash160),
    Stellar(PublicKey32),
    Aion(PublicKey32),
    Nano(PublicKey32),
    Neo(Hash160),
    Decred(HashAddress),
    Iocoin(Hash160),
    Groestlcoin(LegacyAddress),
    Iost(String),
    Nuls(Hash160),
    Bravo(CompressedPublicKey),
    Steem(CompressedPublicKey),
    Eos(EosAddress),
    IoTeX(Hash160),
    Zilliqa(#[serde(serialize_with = "serialize_hex")] Vec<u8>),
    Semux(Hash160),
    Ark(Hash160),
    Waves(Hash160),
}

impl CanonicalAddress {
    /// The Base58Check version byte, for shapes the prefix registry governs.
    pub fn legacy_prefix(&self) -> Option<u8> {
        match self {
            CanonicalAddress::Legacy(addr) | CanonicalAddress::Groestlcoin(addr) => Some(addr.prefix),
            _ => None,
        }
    }

    /// The human-readable part, for shapes the HRP registry governs.
    pub fn hrp(&self) -> Option<&str> {
        match self {
            CanonicalAddress::Segwit(addr) => Some(&addr.hrp),
            CanonicalAddress::Cosmos(addr) => Some(&addr.hrp),
            _ => None,
        }
    }

    /// The codec family that produced this value.
    pub fn family(&self) -> Family {
        match self {
            CanonicalAddress::Legacy(_) => Family::Legacy,
            CanonicalAddress::Segwit(_) => Family::Segwit,
            CanonicalAddress::Cosmos(_) => Family::CosmosBech32,
            CanonicalAddress::CashAddr(_) => Family::CashAddr,
            CanonicalAddress::Ethereum(_) => Family::Ethereum,
            CanonicalAddress::Wanchain(_) => Family::Wanchain,
            CanonicalAddress::Icon(_) => Family::Icon,
            CanonicalAddress::Ontology(_) => Family::Ontology,
            CanonicalAddress::Ripple(_) => Family::Ripple,
            CanonicalAddress::Tezos(_) => Family::Tezos,
            CanonicalAddress::Tron(_) => Family::Tron,
            CanonicalAddress::ZcashTransparent(_) => Family::ZcashTransparent,
            CanonicalAddress::Nimiq(_) => Family::Nimiq,
            CanonicalAddress::Stellar(_) => Family::Stellar,
            CanonicalAddress::Aion(_) => Family::Aion,
            CanonicalAddress::Nano(_) => Family::Nano,
            CanonicalAddress::Neo(_) => Family::Neo,
            CanonicalAddress::Decred(_) => Family::Decred,
            CanonicalAddress::Iocoin(_) => Family::Iocoin,
            CanonicalAddress::Groestlcoin(_) => Family::GroestlLegacy,
            CanonicalAddress::Iost(_) => Family::Iost,
            CanonicalAddress::Nuls(_) => Family::Nuls,
            CanonicalAddress::Bravo(_) => Family::Bravo,
            CanonicalAddress::Steem(_) => Family::Steem,
            CanonicalAddress::Eos(_) => Family::Eos,
            CanonicalAddress::IoTeX(_) => Family::IoTeX,
            CanonicalAddress::Zilliqa(_) => Family::Zilliqa,
            CanonicalAddress::Semux(_) => Family::Semux,
            CanonicalAddress::Ark(_) => Family::Ark,
            CanonicalAddress::Waves(_) => Family::Waves,
        }
    }
}

fn versioned(version: u8, hash: &Hash160, alphabet: &'static bs58::Alphabet) -> String {
    let mut payload = Vec::with_capacity(1 + Hash160::LEN);
    payload.push(version);
    payload.extend_from_slice(hash.as_bytes());
    encode_check(&payload, alphabet)
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CanonicalAddress::Legacy(addr) => versioned(addr.prefix, &addr.hash, bs58::Alphabet::BITCOIN),
            CanonicalAddress::Segwit(addr) => encode_segwit(&addr.hrp, addr.version, &addr.program),
            CanonicalAddress::Cosmos(addr) => encode_hash(&addr.hrp, addr.key_hash.as_bytes()),
            CanonicalAddress::CashAddr(addr) => encode_cashaddr(addr.kind, &addr.hash),
            CanonicalAddress::Ethereum(hash) => encode_evm(hash, EvmChecksum::Eip55),
            CanonicalAddress::Wanchain(hash) => encode_evm(hash, EvmChecksum::Inverted),
            CanonicalAddress::Icon(addr) => format!("{}{}", addr.kind.prefix(), addr.hash.to_hex()),
            CanonicalAddress::Ontology(hash) | CanonicalAddress::Neo(hash) | CanonicalAddress::Ark(hash) => {
                versioned(ACCOUNT_VERSION_0X17, hash, bs58::Alphabet::BITCOIN)
            }
            CanonicalAddress::Ripple(hash) => versioned(RIPPLE_VERSION, hash, bs58::Alphabet::RIPPLE),
            CanonicalAddress::Tezos(addr) => {
                let mut payload = addr.kind.prefix().to_vec();
                payload.extend_from_slice(addr.hash.as_bytes());
                encode_check(&payload, bs58::Alphabet::BITCOIN)
            }
            CanonicalAddress::Tron(hash) => versioned(TRON_VERSION, hash, bs58::Alphabet::BITCOIN),
            CanonicalAddress::ZcashTransparent(addr) => {
                let second = match addr.kind {
                    ScriptKind::P2pkh => crate::registry::ZCASHT_P2PKH,
                    ScriptKind::P2sh => crate::registry::ZCASHT_P2SH,
                };
                let mut payload = vec![ZCASH_LEAD, second];
                payload.extend_from_slice(addr.hash.as_bytes());
                encode_check(&payload, bs58::Alphabet::BITCOIN)
            }
            CanonicalAddress::Nimiq(hash) => encode_nimiq(hash),
            CanonicalAddress::Stellar(key) => encode_stellar(key),
            CanonicalAddress::Aion(key) => format!("0x{}", key.to_hex()),
            CanonicalAddress::Nano(key) => encode_nano(key),
            CanonicalAddress::Decred(addr) => encode_decred(addr.kind, &addr.hash),
            CanonicalAddress::Iocoin(hash) => versioned(IOCOIN_VERSION, hash, bs58::Alphabet::BITCOIN),
            CanonicalAddress::Groestlcoin(addr) => encode_groestl(addr.prefix, &addr.hash),
            CanonicalAddress::Iost(name) => name.clone(),
            CanonicalAddress::Nuls(hash) => encode_nuls(hash),
            CanonicalAddress::Bravo(key) => encode_graphene("BRV", key),
            CanonicalAddress::Steem(key) => encode_graphene("STM", key),
            CanonicalAddress::Eos(addr) => encode_eos(addr.kind, &addr.key),
            CanonicalAddress::IoTeX(hash) => encode_hash("io", hash.as_bytes()),
            CanonicalAddress::Zilliqa(key_hash) => encode_zilliqa(key_hash),
            CanonicalAddress::Semux(hash) => format!("0x{}", hash.to_hex()),
            CanonicalAddress::Waves(hash) => encode_waves(hash),
        };
        f.write_str(&text)
    }
}
