//! Prefix and HRP registry.
//!
//! Static per-network data consulted after a codec has decoded a string:
//! which Base58Check version bytes a network accepts and which bech32 HRP it
//! owns. Version bytes are reused across chains, so the registry also
//! declares every prefix that more than one network accepts and can audit
//! that declaration against the rule table.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::codecs::Family;
use crate::rules::{rules_for, Acceptance};
use crate::{NetworkId, RegistryError};

// Base58Check version bytes, named by the chain that introduced them.
pub const BITCOIN_P2PKH: u8 = 0x00;
pub const BITCOIN_P2SH: u8 = 0x05;
pub const LITECOIN_P2PKH: u8 = 0x30;
pub const LITECOIN_P2SH: u8 = 0x32;
pub const DASH_P2PKH: u8 = 0x4C;
pub const DASH_P2SH: u8 = 0x10;
pub const ZCOIN_P2PKH: u8 = 0x52;
pub const ZCOIN_P2SH: u8 = 0x07;
/// Second byte of a Zcash transparent P2PKH prefix (`t1`).
pub const ZCASHT_P2PKH: u8 = 0xB8;
/// Second byte of a Zcash transparent P2SH prefix (`t3`).
pub const ZCASHT_P2SH: u8 = 0xBD;
/// `D...` addresses: Dogecoin P2PKH, also accepted by DigiByte.
pub const D_P2PKH: u8 = 0x1E;
pub const DOGECOIN_P2SH: u8 = 0x16;
/// `S...` addresses: DigiByte P2SH, also Lux.
pub const S_P2SH: u8 = 0x3F;
pub const QTUM_P2PKH: u8 = 0x3A;
pub const VIACOIN_P2PKH: u8 = 0x47;
pub const VIACOIN_P2SH: u8 = 0x21;
pub const GROESTLCOIN_P2PKH: u8 = 0x24;
pub const MONETARY_UNIT_P2PKH: u8 = 0x10;
pub const MONETARY_UNIT_P2SH: u8 = 0x4C;
pub const RAVENCOIN_P2PKH: u8 = 0x3C;
pub const RAVENCOIN_P2SH: u8 = 0x7A;

/// The version bytes one network accepts for Base58Check addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixSet(&'static [u8]);

impl PrefixSet {
    pub const EMPTY: PrefixSet = PrefixSet(&[]);

    /// Whether `prefix` is one of the accepted version bytes.
    pub fn contains(&self, prefix: u8) -> bool {
        self.0.contains(&prefix)
    }

    /// True for networks without Base58Check addresses.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the raw prefixes.
    pub fn as_slice(&self) -> &'static [u8] {
        self.0
    }

    /// Iterate over the prefixes in table order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + 'static {
        self.0.iter().copied()
    }
}

impl fmt::Display for PrefixSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, prefix) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:#04x}", prefix)?;
        }
        f.write_str("}")
    }
}

impl Serialize for PrefixSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|p| format!("{:#04x}", p)))
    }
}

/// A network's bech32 human-readable part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hrp {
    Known(&'static str),
    /// The network has no bech32 form.
    Unknown,
}

impl Hrp {
    /// Whether a decoded (lowercase) HRP belongs to this network.
    /// `Unknown` matches nothing.
    pub fn matches(&self, hrp: &str) -> bool {
        match self {
            Hrp::Known(known) => *known == hrp,
            Hrp::Unknown => false,
        }
    }

    /// The HRP text, if known.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Hrp::Known(known) => Some(known),
            Hrp::Unknown => None,
        }
    }
}

impl fmt::Display for Hrp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unknown"))
    }
}

impl Serialize for Hrp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(hrp) => serializer.serialize_some(hrp),
            None => serializer.serialize_none(),
        }
    }
}

/// Accepted Base58Check version bytes, P2SH role first.
pub fn prefixes_for(network: NetworkId) -> PrefixSet {
    use NetworkId::*;

    match network {
        Bitcoin | BitcoinCash => PrefixSet(&[BITCOIN_P2SH, BITCOIN_P2PKH]),
        Litecoin => PrefixSet(&[LITECOIN_P2SH, LITECOIN_P2PKH]),
        Lux => PrefixSet(&[S_P2SH, LITECOIN_P2PKH]),
        Groestlcoin => PrefixSet(&[BITCOIN_P2SH, GROESTLCOIN_P2PKH]),
        Dash => PrefixSet(&[DASH_P2SH, DASH_P2PKH]),
        Zcoin => PrefixSet(&[ZCOIN_P2SH, ZCOIN_P2PKH]),
        Zcash | Zelcash => PrefixSet(&[ZCASHT_P2SH, ZCASHT_P2PKH]),
        Qtum => PrefixSet(&[QTUM_P2PKH]),
        Dogecoin => PrefixSet(&[DOGECOIN_P2SH, D_P2PKH]),
        DigiByte => PrefixSet(&[BITCOIN_P2SH, S_P2SH, D_P2PKH]),
        Viacoin => PrefixSet(&[VIACOIN_P2SH, VIACOIN_P2PKH]),
        MonetaryUnit => PrefixSet(&[MONETARY_UNIT_P2SH, MONETARY_UNIT_P2PKH]),
        Ravencoin => PrefixSet(&[RAVENCOIN_P2SH, RAVENCOIN_P2PKH]),
        _ => PrefixSet::EMPTY,
    }
}

/// The bech32 human-readable part a network's addresses must carry.
pub fn hrp_for(network: NetworkId) -> Hrp {
    use NetworkId::*;

    match network {
        Bitcoin => Hrp::Known("bc"),
        Litecoin => Hrp::Known("ltc"),
        BitcoinCash => Hrp::Known("bitcoincash"),
        Binance => Hrp::Known("bnb"),
        Cosmos => Hrp::Known("cosmos"),
        DigiByte => Hrp::Known("dgb"),
        Groestlcoin => Hrp::Known("grs"),
        Viacoin => Hrp::Known("via"),
        Qtum => Hrp::Known("qc"),
        Zilliqa => Hrp::Known("zil"),
        IoTeX => Hrp::Known("io"),
        _ => Hrp::Unknown,
    }
}

/// A version byte that several networks accept under one codec family.
///
/// Such strings classify for every listed network. The CanonicalAddress
/// records only the prefix and hash, never which network accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SharedPrefix {
    pub family: Family,
    pub prefix: u8,
    pub networks: &'static [NetworkId],
}

/// Every version byte more than one network accepts, with those networks.
pub const SHARED_PREFIXES: &[SharedPrefix] = &[
    // Bitcoin Cash kept Bitcoin's legacy prefixes; CashAddr is tried first.
    SharedPrefix {
        family: Family::Legacy,
        prefix: BITCOIN_P2PKH,
        networks: &[NetworkId::Bitcoin, NetworkId::BitcoinCash],
    },
    SharedPrefix {
        family: Family::Legacy,
        prefix: BITCOIN_P2SH,
        networks: &[NetworkId::Bitcoin, NetworkId::BitcoinCash, NetworkId::DigiByte],
    },
    SharedPrefix {
        family: Family::Legacy,
        prefix: LITECOIN_P2PKH,
        networks: &[NetworkId::Litecoin, NetworkId::Lux],
    },
    SharedPrefix {
        family: Family::Legacy,
        prefix: S_P2SH,
        networks: &[NetworkId::DigiByte, NetworkId::Lux],
    },
    SharedPrefix {
        family: Family::Legacy,
        prefix: D_P2PKH,
        networks: &[NetworkId::DigiByte, NetworkId::Dogecoin],
    },
    // Dash P2SH is MonetaryUnit P2PKH and the other way round.
    SharedPrefix {
        family: Family::Legacy,
        prefix: DASH_P2SH,
        networks: &[NetworkId::Dash, NetworkId::MonetaryUnit],
    },
    SharedPrefix {
        family: Family::Legacy,
        prefix: DASH_P2PKH,
        networks: &[NetworkId::Dash, NetworkId::MonetaryUnit],
    },
];

/// Networks that accept each (family, prefix) pair through a prefix-set rule.
pub fn prefix_usage() -> BTreeMap<(Family, u8), Vec<NetworkId>> {
    let mut usage: BTreeMap<(Family, u8), Vec<NetworkId>> = BTreeMap::new();
    for &network in NetworkId::ALL {
        for rule in rules_for(network) {
            if rule.acceptance != Acceptance::PrefixSet {
                continue;
            }
            for prefix in prefixes_for(network).iter() {
                let networks = usage.entry((rule.codec.family(), prefix)).or_default();
                if !networks.contains(&network) {
                    networks.push(network);
                }
            }
        }
    }
    usage
}

/// Audit the prefix registry against the rule table.
///
/// Fails when two networks accept the same (family, prefix) pair without a
/// [`SHARED_PREFIXES`] entry, or when an entry no longer describes the table.
pub fn check_prefix_table() -> Result<(), RegistryError> {
    let usage = prefix_usage();

    for ((family, prefix), networks) in &usage {
        if networks.len() < 2 {
            continue;
        }
        let declared = SHARED_PREFIXES
            .iter()
            .find(|shared| shared.family == *family && shared.prefix == *prefix);
        match declared {
            None => {
                return Err(RegistryError::UndeclaredSharedPrefix {
                    family: *family,
                    prefix: *prefix,
                    networks: networks.clone(),
                })
            }
            Some(shared) if !same_networks(shared.networks, networks) => {
                return Err(stale(shared, networks.clone()))
            }
            Some(_) => {}
        }
    }

    for shared in SHARED_PREFIXES {
        let actual = usage
            .get(&(shared.family, shared.prefix))
            .cloned()
            .unwrap_or_default();
        if actual.len() < 2 || !same_networks(shared.networks, &actual) {
            return Err(stale(shared, actual));
        }
    }

    log::debug!(
        "prefix registry consistent: {} shared prefixes declared",
        SHARED_PREFIXES.len()
    );
    Ok(())
}

fn same_networks(declared: &[NetworkId], actual: &[NetworkId]) -> bool {
    let mut declared = declared.to_vec();
    let mut actual = actual.to_vec();
    declared.sort_unstable();
    actual.sort_unstable();
    declared == actual
}

fn stale(shared: &SharedPrefix, actual: Vec<NetworkId>) -> RegistryError {
    RegistryError::StaleSharedPrefix {
        family: shared.family,
        prefix: shared.prefix,
        declared: shared.networks.to_vec(),
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_consistent() {
        assert_eq!(check_prefix_table(), Ok(()));
    }

    #[test]
    fn test_bitcoin_and_bitcoin_cash_share_prefixes() {
        assert_eq!(prefixes_for(NetworkId::Bitcoin), prefixes_for(NetworkId::BitcoinCash));
        assert!(prefixes_for(NetworkId::Bitcoin).contains(BITCOIN_P2PKH));
        assert!(prefixes_for(NetworkId::Bitcoin).contains(BITCOIN_P2SH));
    }

    #[test]
    fn test_prefix_sets() {
        assert_eq!(prefixes_for(NetworkId::DigiByte).as_slice(), &[0x05, 0x3F, 0x1E]);
        assert_eq!(prefixes_for(NetworkId::Qtum).as_slice(), &[0x3A]);
        assert_eq!(prefixes_for(NetworkId::Zelcash), prefixes_for(NetworkId::Zcash));
        assert!(prefixes_for(NetworkId::Ethereum).is_empty());
        assert!(prefixes_for(NetworkId::Kin).is_empty());
    }

    #[test]
    fn test_hrps() {
        assert_eq!(hrp_for(NetworkId::Bitcoin), Hrp::Known("bc"));
        assert_eq!(hrp_for(NetworkId::IoTeX).as_str(), Some("io"));
        assert_eq!(hrp_for(NetworkId::Ethereum), Hrp::Unknown);
        assert!(hrp_for(NetworkId::Litecoin).matches("ltc"));
        assert!(!hrp_for(NetworkId::Litecoin).matches("bc"));
        assert!(!Hrp::Unknown.matches(""));
        assert!(!Hrp::Unknown.matches("unknown"));
    }

    #[test]
    fn test_each_hrp_has_one_network() {
        let mut hrps: Vec<&str> = NetworkId::ALL
            .iter()
            .filter_map(|n| hrp_for(*n).as_str())
            .collect();
        let total = hrps.len();
        hrps.sort_unstable();
        hrps.dedup();
        assert_eq!(hrps.len(), total);
    }

    #[test]
    fn test_usage_excludes_authoritative_codecs() {
        let usage = prefix_usage();
        // Groestlcoin's legacy decoder is authoritative, so 0x05 stays with
        // the Base58Check chains only.
        assert_eq!(
            usage.get(&(Family::Legacy, BITCOIN_P2SH)).map(Vec::len),
            Some(3)
        );
        assert!(!usage.keys().any(|(family, _)| *family == Family::GroestlLegacy));
        assert!(!usage.contains_key(&(Family::Legacy, ZCASHT_P2PKH)));
    }

    #[test]
    fn test_display() {
        assert_eq!(prefixes_for(NetworkId::Litecoin).to_string(), "{0x32, 0x30}");
        assert_eq!(Hrp::Unknown.to_string(), "unknown");
        assert_eq!(
            serde_json::to_string(&prefixes_for(NetworkId::Qtum)).unwrap(),
            "[\"0x3a\"]"
        );
        assert_eq!(serde_json::to_string(&Hrp::Unknown).unwrap(), "null");
    }
}
