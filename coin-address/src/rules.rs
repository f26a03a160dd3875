//! Network rule table.
//!
//! Each network maps to an ordered list of codecs, tried first to last, and
//! the check applied to whatever a codec decodes. The match in [`rules_for`]
//! is exhaustive, so a new [`NetworkId`] does not build until it has rules.

use std::fmt;

use serde::Serialize;

use crate::address::{CanonicalAddress, ACCOUNT_VERSION_0X17, IOCOIN_VERSION, RIPPLE_VERSION, TRON_VERSION};
use crate::codecs::{
    AddressCodec, AionCodec, CashAddrCodec, CosmosCodec, DecredCodec, EosCodec, EvmChecksum,
    EvmCodec, Family, GrapheneCodec, GroestlLegacyCodec, IconCodec, IoTeXCodec, IostCodec,
    LegacyCodec, NanoCodec, NimiqCodec, NulsCodec, SegwitCodec, SemuxCodec, StellarCodec,
    TezosCodec, VersionedCodec, WavesCodec, ZcashTransparentCodec, ZilliqaCodec,
};
use crate::registry::{hrp_for, prefixes_for};
use crate::{AddressError, NetworkId};

/// What a network requires of a decoded value beyond the codec's own checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Acceptance {
    /// The codec's validation is final.
    Authoritative,
    /// The decoded version byte must be in the network's prefix set.
    PrefixSet,
    /// The decoded HRP must be the network's HRP.
    Hrp,
}

impl Acceptance {
    /// Apply this check for `network` to a decoded value.
    pub fn check(&self, network: NetworkId, address: &CanonicalAddress) -> Result<(), AddressError> {
        match self {
            Acceptance::Authoritative => Ok(()),
            Acceptance::PrefixSet => match address.legacy_prefix() {
                Some(prefix) if prefixes_for(network).contains(prefix) => Ok(()),
                Some(prefix) => Err(AddressError::IdentifierMismatch {
                    network,
                    found: format!("prefix {:#04x}", prefix),
                }),
                None => Err(address.family().not_applicable()),
            },
            Acceptance::Hrp => match address.hrp() {
                Some(hrp) if hrp_for(network).matches(hrp) => Ok(()),
                Some(hrp) => Err(AddressError::IdentifierMismatch {
                    network,
                    found: format!("hrp {:?}", hrp),
                }),
                None => Err(address.family().not_applicable()),
            },
        }
    }
}

/// One entry of a network's priority list.
#[derive(Clone, Copy)]
pub struct Rule {
    pub codec: &'static dyn AddressCodec,
    pub acceptance: Acceptance,
}

impl Rule {
    pub const fn new(codec: &'static dyn AddressCodec, acceptance: Acceptance) -> Self {
        Self { codec, acceptance }
    }

    const fn authoritative(codec: &'static dyn AddressCodec) -> Self {
        Self::new(codec, Acceptance::Authoritative)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("family", &self.codec.family())
            .field("acceptance", &self.acceptance)
            .finish()
    }
}

static LEGACY: LegacyCodec = LegacyCodec;
static SEGWIT: SegwitCodec = SegwitCodec;
static COSMOS: CosmosCodec = CosmosCodec;
static CASHADDR: CashAddrCodec = CashAddrCodec;
static GROESTL_LEGACY: GroestlLegacyCodec = GroestlLegacyCodec;

static ETHEREUM: EvmCodec = EvmCodec::new(EvmChecksum::Eip55);
static WANCHAIN: EvmCodec = EvmCodec::new(EvmChecksum::Inverted);
static ICON: IconCodec = IconCodec;
static AION: AionCodec = AionCodec;
static SEMUX: SemuxCodec = SemuxCodec;

static ONTOLOGY: VersionedCodec = VersionedCodec::new(
    Family::Ontology,
    ACCOUNT_VERSION_0X17,
    bs58::Alphabet::BITCOIN,
    CanonicalAddress::Ontology,
);
static NEO: VersionedCodec = VersionedCodec::new(
    Family::Neo,
    ACCOUNT_VERSION_0X17,
    bs58::Alphabet::BITCOIN,
    CanonicalAddress::Neo,
);
static ARK: VersionedCodec = VersionedCodec::new(
    Family::Ark,
    ACCOUNT_VERSION_0X17,
    bs58::Alphabet::BITCOIN,
    CanonicalAddress::Ark,
);
static RIPPLE: VersionedCodec = VersionedCodec::new(
    Family::Ripple,
    RIPPLE_VERSION,
    bs58::Alphabet::RIPPLE,
    CanonicalAddress::Ripple,
);
static TRON: VersionedCodec = VersionedCodec::new(
    Family::Tron,
    TRON_VERSION,
    bs58::Alphabet::BITCOIN,
    CanonicalAddress::Tron,
);
static IOCOIN: VersionedCodec = VersionedCodec::new(
    Family::Iocoin,
    IOCOIN_VERSION,
    bs58::Alphabet::BITCOIN,
    CanonicalAddress::Iocoin,
);
static TEZOS: TezosCodec = TezosCodec;
static ZCASH_TRANSPARENT: ZcashTransparentCodec = ZcashTransparentCodec;
static DECRED: DecredCodec = DecredCodec;

static BRAVO: GrapheneCodec = GrapheneCodec::new(Family::Bravo, "BRV", CanonicalAddress::Bravo);
static STEEM: GrapheneCodec = GrapheneCodec::new(Family::Steem, "STM", CanonicalAddress::Steem);
static EOS: EosCodec = EosCodec;

static NIMIQ: NimiqCodec = NimiqCodec;
static STELLAR: StellarCodec = StellarCodec;
static NANO: NanoCodec = NanoCodec;
static IOST: IostCodec = IostCodec;
static NULS: NulsCodec = NulsCodec;
static IOTEX: IoTeXCodec = IoTeXCodec;
static ZILLIQA: ZilliqaCodec = ZilliqaCodec;
static WAVES: WavesCodec = WavesCodec;

// Bech32 carries a stronger checksum than Base58Check, so it goes first.
static SEGWIT_THEN_LEGACY: &[Rule] = &[
    Rule::new(&SEGWIT, Acceptance::Hrp),
    Rule::new(&LEGACY, Acceptance::PrefixSet),
];
static CASHADDR_THEN_LEGACY: &[Rule] = &[
    Rule::authoritative(&CASHADDR),
    Rule::new(&LEGACY, Acceptance::PrefixSet),
];
static LEGACY_ONLY: &[Rule] = &[Rule::new(&LEGACY, Acceptance::PrefixSet)];
static SEGWIT_THEN_GROESTL: &[Rule] = &[
    Rule::new(&SEGWIT, Acceptance::Hrp),
    Rule::authoritative(&GROESTL_LEGACY),
];
static COSMOS_ONLY: &[Rule] = &[Rule::new(&COSMOS, Acceptance::Hrp)];

static ETHEREUM_RULES: &[Rule] = &[Rule::authoritative(&ETHEREUM)];
static WANCHAIN_RULES: &[Rule] = &[Rule::authoritative(&WANCHAIN)];
static ICON_RULES: &[Rule] = &[Rule::authoritative(&ICON)];
static AION_RULES: &[Rule] = &[Rule::authoritative(&AION)];
static SEMUX_RULES: &[Rule] = &[Rule::authoritative(&SEMUX)];
static ONTOLOGY_RULES: &[Rule] = &[Rule::authoritative(&ONTOLOGY)];
static NEO_RULES: &[Rule] = &[Rule::authoritative(&NEO)];
static ARK_RULES: &[Rule] = &[Rule::authoritative(&ARK)];
static RIPPLE_RULES: &[Rule] = &[Rule::authoritative(&RIPPLE)];
static TRON_RULES: &[Rule] = &[Rule::authoritative(&TRON)];
static IOCOIN_RULES: &[Rule] = &[Rule::authoritative(&IOCOIN)];
static TEZOS_RULES: &[Rule] = &[Rule::authoritative(&TEZOS)];
static ZCASH_RULES: &[Rule] = &[Rule::authoritative(&ZCASH_TRANSPARENT)];
static DECRED_RULES: &[Rule] = &[Rule::authoritative(&DECRED)];
static BRAVO_RULES: &[Rule] = &[Rule::authoritative(&BRAVO)];
static STEEM_RULES: &[Rule] = &[Rule::authoritative(&STEEM)];
static EOS_RULES: &[Rule] = &[Rule::authoritative(&EOS)];
static NIMIQ_RULES: &[Rule] = &[Rule::authoritative(&NIMIQ)];
static STELLAR_RULES: &[Rule] = &[Rule::authoritative(&STELLAR)];
static NANO_RULES: &[Rule] = &[Rule::authoritative(&NANO)];
static IOST_RULES: &[Rule] = &[Rule::authoritative(&IOST)];
static NULS_RULES: &[Rule] = &[Rule::authoritative(&NULS)];
static IOTEX_RULES: &[Rule] = &[Rule::authoritative(&IOTEX)];
static ZILLIQA_RULES: &[Rule] = &[Rule::authoritative(&ZILLIQA)];
static WAVES_RULES: &[Rule] = &[Rule::authoritative(&WAVES)];

/// The codecs tried for `network`, in priority order.
pub fn rules_for(network: NetworkId) -> &'static [Rule] {
    use NetworkId::*;

    match network {
        Bitcoin | Litecoin | Viacoin | Qtum | DigiByte => SEGWIT_THEN_LEGACY,
        BitcoinCash => CASHADDR_THEN_LEGACY,
        Dash | Dogecoin | Zcoin | Lux | MonetaryUnit | Ravencoin => LEGACY_ONLY,
        Groestlcoin => SEGWIT_THEN_GROESTL,
        Binance | Cosmos => COSMOS_ONLY,
        Callisto | Dexon | Ellaism | Ethereum | EthereumClassic | Ethersocial | GoChain
        | PoaNetwork | Theta | ThunderToken | TomoChain | VeChain | Xdai => ETHEREUM_RULES,
        Wanchain => WANCHAIN_RULES,
        Icon => ICON_RULES,
        Ontology => ONTOLOGY_RULES,
        Xrp => RIPPLE_RULES,
        Tezos => TEZOS_RULES,
        Tron => TRON_RULES,
        Zcash | Zelcash => ZCASH_RULES,
        Nimiq => NIMIQ_RULES,
        Stellar | Kin => STELLAR_RULES,
        Aion => AION_RULES,
        Nano => NANO_RULES,
        Neo => NEO_RULES,
        Decred => DECRED_RULES,
        Iocoin => IOCOIN_RULES,
        Iost => IOST_RULES,
        Nuls => NULS_RULES,
        BravoCoin => BRAVO_RULES,
        Steem => STEEM_RULES,
        Eos => EOS_RULES,
        IoTeX => IOTEX_RULES,
        Zilliqa => ZILLIQA_RULES,
        Semux => SEMUX_RULES,
        Ark => ARK_RULES,
        Waves => WAVES_RULES,
    }
}

/// The codec families tried for `network`, in priority order.
pub fn priority(network: NetworkId) -> Vec<Family> {
    rules_for(network).iter().map(|rule| rule.codec.family()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::LegacyAddress;
    use crate::types::Hash160;
    use crate::registry::Hrp;

    #[test]
    fn test_every_network_has_rules() {
        for network in NetworkId::ALL {
            assert!(!rules_for(*network).is_empty(), "{} has no rules", network);
        }
    }

    #[test]
    fn test_priority_orders() {
        assert_eq!(priority(NetworkId::Bitcoin), vec![Family::Segwit, Family::Legacy]);
        assert_eq!(priority(NetworkId::BitcoinCash), vec![Family::CashAddr, Family::Legacy]);
        assert_eq!(priority(NetworkId::Dogecoin), vec![Family::Legacy]);
        assert_eq!(
            priority(NetworkId::Groestlcoin),
            vec![Family::Segwit, Family::GroestlLegacy]
        );
        assert_eq!(priority(NetworkId::Binance), vec![Family::CosmosBech32]);
        assert_eq!(priority(NetworkId::VeChain), vec![Family::Ethereum]);
        assert_eq!(priority(NetworkId::Kin), vec![Family::Stellar]);
        assert_eq!(priority(NetworkId::Zelcash), vec![Family::ZcashTransparent]);
    }

    #[test]
    fn test_prefix_rules_have_prefixes() {
        for network in NetworkId::ALL {
            for rule in rules_for(*network) {
                match rule.acceptance {
                    Acceptance::PrefixSet => {
                        assert!(!prefixes_for(*network).is_empty(), "{}", network)
                    }
                    Acceptance::Hrp => assert_ne!(hrp_for(*network), Hrp::Unknown, "{}", network),
                    Acceptance::Authoritative => {}
                }
            }
        }
    }

    #[test]
    fn test_prefix_check() {
        let dash_p2sh = CanonicalAddress::Legacy(LegacyAddress {
            prefix: 0x10,
            hash: Hash160::new([1; 20]),
        });
        assert_eq!(Acceptance::PrefixSet.check(NetworkId::Dash, &dash_p2sh), Ok(()));
        assert_eq!(Acceptance::PrefixSet.check(NetworkId::MonetaryUnit, &dash_p2sh), Ok(()));
        assert_eq!(
            Acceptance::PrefixSet.check(NetworkId::Bitcoin, &dash_p2sh),
            Err(AddressError::IdentifierMismatch {
                network: NetworkId::Bitcoin,
                found: "prefix 0x10".to_string(),
            })
        );
        assert_eq!(Acceptance::Authoritative.check(NetworkId::Bitcoin, &dash_p2sh), Ok(()));
    }

    #[test]
    fn test_hrp_check() {
        let ltc = SegwitCodec
            .decode("ltc1qg82tyqlnsm4f2fqpnj3mehuzvpyrplsday80wy")
            .unwrap();
        assert_eq!(Acceptance::Hrp.check(NetworkId::Litecoin, &ltc), Ok(()));
        assert_eq!(
            Acceptance::Hrp.check(NetworkId::Bitcoin, &ltc),
            Err(AddressError::IdentifierMismatch {
                network: NetworkId::Bitcoin,
                found: "hrp \"ltc\"".to_string(),
            })
        );
    }

    #[test]
    fn test_rule_debug() {
        let text = format!("{:?}", rules_for(NetworkId::Bitcoin)[0]);
        assert_eq!(text, "Rule { family: Segwit, acceptance: Hrp }");
    }
}
