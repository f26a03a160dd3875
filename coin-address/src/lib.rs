//! Cryptocurrency Address Classification
//!
//! This crate decides whether a string is a valid address for a given
//! blockchain network and, if it is, returns a typed, checksum-verified
//! [`CanonicalAddress`].
//!
//! # Overview
//!
//! Many networks share an encoding and differ only in version bytes or the
//! bech32 human-readable part. Classification therefore runs in two layers:
//! - **Codecs**: one adapter per encoding, unaware of the requesting network
//! - **Rules**: per network, the codecs to try in order and the prefix or HRP
//!   check to apply to what they decode
//!
//! Segwit chains try bech32 before Base58Check, Bitcoin Cash tries CashAddr
//! before its legacy form, and single-format chains have exactly one codec.
//!
//! # Example
//!
//! ```rust
//! use coin_address::{classify, diagnose, CanonicalAddress, NetworkId};
//!
//! let genesis = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
//!
//! let address = classify(NetworkId::Bitcoin, genesis).unwrap();
//! assert!(matches!(address, CanonicalAddress::Legacy(_)));
//! assert_eq!(address.to_string(), genesis);
//!
//! // Bitcoin Cash still accepts the legacy form.
//! assert!(classify(NetworkId::BitcoinCash, genesis).is_some());
//!
//! // Rejections carry a reason when asked for one.
//! assert!(classify(NetworkId::Litecoin, genesis).is_none());
//! assert!(diagnose(NetworkId::Litecoin, genesis).is_err());
//! ```

mod address;
mod classify;
mod codecs;
mod error;
mod registry;
mod rules;
mod types;

pub use address::{
    Bech32Address, CanonicalAddress, EosAddress, EosKeyKind, HashAddress, IconAddress, IconKind,
    LegacyAddress, ScriptKind, SegwitAddress, TezosAddress, TezosKind,
};
pub use classify::{classify, diagnose, is_valid_address};
pub use codecs::{
    AddressCodec, AionCodec, CashAddrCodec, CosmosCodec, DecredCodec, EosCodec, EvmChecksum,
    EvmCodec, Family, GrapheneCodec, GroestlLegacyCodec, IconCodec, IoTeXCodec, IostCodec,
    LegacyCodec, NanoCodec, NimiqCodec, NulsCodec, SegwitCodec, SemuxCodec, StellarCodec,
    TezosCodec, VersionedCodec, WavesCodec, ZcashTransparentCodec, ZilliqaCodec,
};
pub use error::{AddressError, RegistryError};
pub use registry::{
    check_prefix_table, hrp_for, prefix_usage, prefixes_for, Hrp, PrefixSet, SharedPrefix,
    SHARED_PREFIXES,
};
pub use rules::{priority, rules_for, Acceptance, Rule};
pub use types::{CompressedPublicKey, Hash160, NetworkId, PublicKey32};
