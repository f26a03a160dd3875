//! Core types: network identifiers and fixed-size payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::AddressError;

macro_rules! networks {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)*) => {
        /// Every blockchain network the classifier knows about.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NetworkId {
            $($(#[$doc])* $variant,)*
        }

        impl NetworkId {
            /// All networks, in declaration order.
            pub const ALL: &'static [NetworkId] = &[$(NetworkId::$variant,)*];

            /// Stable lowercase identifier.
            pub fn name(&self) -> &'static str {
                match self {
                    $(NetworkId::$variant => $name,)*
                }
            }
        }

        impl FromStr for NetworkId {
            type Err = AddressError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($name => Ok(NetworkId::$variant),)*
                    _ => Err(AddressError::UnknownNetwork(s.to_string())),
                }
            }
        }
    };
}

networks! {
    Aion => "aion",
    Ark => "ark",
    /// Binance Chain (bech32 `bnb`).
    Binance => "binance",
    Bitcoin => "bitcoin",
    BitcoinCash => "bitcoincash",
    BravoCoin => "bravocoin",
    Callisto => "callisto",
    Cosmos => "cosmos",
    Dash => "dash",
    Decred => "decred",
    Dexon => "dexon",
    DigiByte => "digibyte",
    Dogecoin => "dogecoin",
    Ellaism => "ellaism",
    Eos => "eos",
    Ethereum => "ethereum",
    EthereumClassic => "ethereumclassic",
    Ethersocial => "ethersocial",
    GoChain => "gochain",
    Groestlcoin => "groestlcoin",
    Icon => "icon",
    Iocoin => "iocoin",
    Iost => "iost",
    IoTeX => "iotex",
    Kin => "kin",
    Litecoin => "litecoin",
    Lux => "lux",
    MonetaryUnit => "monetaryunit",
    Nano => "nano",
    Neo => "neo",
    Nimiq => "nimiq",
    Nuls => "nuls",
    Ontology => "ontology",
    PoaNetwork => "poanetwork",
    Qtum => "qtum",
    Ravencoin => "ravencoin",
    Semux => "semux",
    Steem => "steem",
    Stellar => "stellar",
    Tezos => "tezos",
    Theta => "theta",
    ThunderToken => "thundertoken",
    TomoChain => "tomochain",
    Tron => "tron",
    VeChain => "vechain",
    Viacoin => "viacoin",
    Wanchain => "wanchain",
    Waves => "waves",
    Xdai => "xdai",
    /// Ripple.
    Xrp => "xrp",
    Zcash => "zcash",
    Zcoin => "zcoin",
    Zelcash => "zelcash",
    Zilliqa => "zilliqa",
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A 20-byte key or script hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash160(pub [u8; 20]);

impl Hash160 {
    /// Number of bytes in the hash.
    pub const LEN: usize = 20;

    /// Create from raw bytes.
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl TryFrom<&[u8]> for Hash160 {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != Self::LEN {
            return Err(AddressError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl Serialize for Hash160 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A 32-byte public key.
///
/// Ed25519 accounts (Stellar, Kin, Nano) and Aion addresses carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey32(pub [u8; 32]);

impl PublicKey32 {
    /// Number of bytes in the key.
    pub const LEN: usize = 32;

    /// Create from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl TryFrom<&[u8]> for PublicKey32 {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != Self::LEN {
            return Err(AddressError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl Serialize for PublicKey32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A compressed secp256k1 or secp256r1 public key (33 bytes).
///
/// Graphene chains (EOS, Steem, BravoCoin) use the key itself as the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompressedPublicKey(pub [u8; 33]);

impl CompressedPublicKey {
    /// Number of bytes in the key.
    pub const LEN: usize = 33;

    /// Create from raw bytes.
    pub fn new(bytes: [u8; 33]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl TryFrom<&[u8]> for CompressedPublicKey {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != Self::LEN {
            return Err(AddressError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 33];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl Serialize for CompressedPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_names_roundtrip() {
        for network in NetworkId::ALL {
            let parsed: NetworkId = network.name().parse().unwrap();
            assert_eq!(parsed, *network);
        }
    }

    #[test]
    fn test_network_names_are_unique() {
        let mut names: Vec<&str> = NetworkId::ALL.iter().map(|n| n.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), NetworkId::ALL.len());
        assert_eq!(NetworkId::ALL.len(), 54);
    }

    #[test]
    fn test_network_parse_is_case_insensitive() {
        assert_eq!("BitcoinCash".parse::<NetworkId>().unwrap(), NetworkId::BitcoinCash);
        assert_eq!("XRP".parse::<NetworkId>().unwrap(), NetworkId::Xrp);
        assert!(matches!(
            "dogecash".parse::<NetworkId>(),
            Err(AddressError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_network_serde() {
        let json = serde_json::to_string(&NetworkId::IoTeX).unwrap();
        assert_eq!(json, "\"iotex\"");
        let back: NetworkId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NetworkId::IoTeX);
    }

    #[test]
    fn test_hash160_try_from() {
        let bytes = [7u8; 20];
        let hash = Hash160::try_from(&bytes[..]).unwrap();
        assert_eq!(hash.as_bytes(), &bytes);
        assert_eq!(hash.to_hex(), "07".repeat(20));

        let short = Hash160::try_from(&bytes[..19]);
        assert!(matches!(
            short,
            Err(AddressError::InvalidLength {
                expected: 20,
                actual: 19
            })
        ));
    }

    #[test]
    fn test_compressed_key_try_from() {
        let mut bytes = [0x11u8; 33];
        bytes[0] = 0x03;
        let key = CompressedPublicKey::try_from(&bytes[..]).unwrap();
        assert_eq!(key.as_bytes()[0], 0x03);
        assert!(matches!(
            CompressedPublicKey::try_from(&bytes[..32]),
            Err(AddressError::InvalidLength {
                expected: 33,
                actual: 32
            })
        ));
        assert!(PublicKey32::try_from(&bytes[..32]).is_ok());
    }

    #[test]
    fn test_payload_serializes_as_hex() {
        let key = CompressedPublicKey::new([0xab; 33]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(33)));
    }
}
