//! Codec adapters, one per address encoding.
//!
//! Every adapter implements [`AddressCodec`]: it receives only the raw string,
//! verifies whatever checksum the format carries and hands back a
//! [`CanonicalAddress`]. Adapters never see the requesting network, which is
//! what lets one adapter serve every chain that shares its format. Network
//! specific acceptance (prefix sets, HRPs) is applied by the rule table.
//!
//! Constants follow the chain parameters of the respective reference clients.

mod base58;
mod bits;
mod cashaddr;
mod cosmos;
mod decred;
mod evm;
mod graphene;
mod groestl;
mod iost;
mod nano;
mod nimiq;
mod nuls;
mod stellar;
mod segwit;
mod waves;
mod zilliqa;

use std::fmt;

use serde::Serialize;

use crate::{AddressError, CanonicalAddress};

pub use self::base58::{LegacyCodec, TezosCodec, VersionedCodec, ZcashTransparentCodec};
pub use self::cosmos::{CosmosCodec, IoTeXCodec};
pub use self::cashaddr::CashAddrCodec;
pub use self::decred::DecredCodec;
pub use self::graphene::{EosCodec, GrapheneCodec};
pub use self::groestl::GroestlLegacyCodec;
pub use self::evm::{AionCodec, EvmChecksum, EvmCodec, IconCodec, SemuxCodec};
pub use self::iost::IostCodec;
pub use self::nano::NanoCodec;
pub use self::nimiq::NimiqCodec;
pub use self::nuls::NulsCodec;
pub use self::segwit::SegwitCodec;
pub use self::stellar::StellarCodec;
pub use self::waves::WavesCodec;
pub use self::zilliqa::ZilliqaCodec;

pub(crate) use self::base58::encode_check;
pub(crate) use self::cosmos::encode_hash;
pub(crate) use self::cashaddr::encode as encode_cashaddr;
pub(crate) use self::decred::encode as encode_decred;
pub(crate) use self::graphene::{encode_eos, encode_graphene};
pub(crate) use self::groestl::encode as encode_groestl;
pub(crate) use self::evm::encode_evm;
pub(crate) use self::nano::encode as encode_nano;
pub(crate) use self::nimiq::encode as encode_nimiq;
pub(crate) use self::nuls::encode as encode_nuls;
pub(crate) use self::segwit::encode as encode_segwit;
pub(crate) use self::stellar::encode as encode_stellar;
pub(crate) use self::waves::encode as encode_waves;
pub(crate) use self::zilliqa::encode as encode_zilliqa;

/// Encoding family an adapter implements.
///
/// Two adapters of the same family produce byte-compatible payloads, which is
/// what the registry audit groups prefixes by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Family {
    Legacy,
    Segwit,
    CosmosBech32,
    CashAddr,
    Ethereum,
    Wanchain,
    Icon,
    Ontology,
    Ripple,
    Tezos,
    Tron,
    ZcashTransparent,
    Nimiq,
    Stellar,
    Aion,
    Nano,
    Neo,
    Decred,
    Iocoin,
    GroestlLegacy,
    Iost,
    Nuls,
    Bravo,
    Steem,
    Eos,
    IoTeX,
    Zilliqa,
    Semux,
    Ark,
    Waves,
}

impl Family {
    /// Human-readable name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Family::Legacy => "Base58Check",
            Family::Segwit => "segwit bech32",
            Family::CosmosBech32 => "cosmos bech32",
            Family::CashAddr => "CashAddr",
            Family::Ethereum => "EIP-55 hex",
            Family::Wanchain => "Wanchain hex",
            Family::Icon => "ICON hex",
            Family::Ontology => "Ontology Base58Check",
            Family::Ripple => "Ripple Base58Check",
            Family::Tezos => "Tezos Base58Check",
            Family::Tron => "Tron Base58Check",
            Family::ZcashTransparent => "Zcash transparent",
            Family::Nimiq => "Nimiq IBAN",
            Family::Stellar => "Stellar strkey",
            Family::Aion => "Aion hex",
            Family::Nano => "Nano base32",
            Family::Neo => "NEO Base58Check",
            Family::Decred => "Decred Base58",
            Family::Iocoin => "Iocoin Base58Check",
            Family::GroestlLegacy => "Groestlcoin Base58",
            Family::Iost => "IOST account",
            Family::Nuls => "NULS Base58",
            Family::Bravo => "BravoCoin key",
            Family::Steem => "Steem key",
            Family::Eos => "EOS key",
            Family::IoTeX => "IoTeX bech32",
            Family::Zilliqa => "Zilliqa",
            Family::Semux => "Semux hex",
            Family::Ark => "ARK Base58Check",
            Family::Waves => "Waves Base58",
        }
    }

    pub(crate) fn not_applicable(self) -> AddressError {
        AddressError::NotApplicable { family: self }
    }

    pub(crate) fn checksum_mismatch(self) -> AddressError {
        AddressError::ChecksumMismatch { family: self }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoder for one address encoding.
///
/// Implementations must be total: any input, however malformed, yields an
/// `Err` rather than a panic. A returned address has already passed the
/// format's checksum.
pub trait AddressCodec: Send + Sync {
    /// The encoding family this adapter implements.
    fn family(&self) -> Family;

    /// Decode `input`, reporting why it was not accepted.
    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError>;

    /// Decode `input`, discarding the failure reason.
    fn attempt_decode(&self, input: &str) -> Option<CanonicalAddress> {
        self.decode(input).ok()
    }
}
