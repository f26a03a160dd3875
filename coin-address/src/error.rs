//! Error types for address classification.

use thiserror::Error;

use crate::codecs::Family;
use crate::NetworkId;

/// Reasons an input string was not accepted.
///
/// `classify` collapses all of these into `None`; `diagnose` hands them back
/// for logging and tooling. The variant never changes whether an input is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input does not have the shape of this encoding at all.
    #[error("not a {family} string")]
    NotApplicable { family: Family },

    /// The input has the right shape but fails its integrity check.
    #[error("{family} checksum mismatch")]
    ChecksumMismatch { family: Family },

    /// The input decodes cleanly but its prefix or HRP belongs to another network.
    #[error("{found} does not identify a {network} address")]
    IdentifierMismatch { network: NetworkId, found: String },

    /// A payload slice has the wrong number of bytes.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The network name is not one of the supported identifiers.
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

impl AddressError {
    /// Ordering used when several codecs fail for one network: the most
    /// specific failure wins.
    pub(crate) fn specificity(&self) -> u8 {
        match self {
            AddressError::IdentifierMismatch { .. } => 3,
            AddressError::ChecksumMismatch { .. } => 2,
            AddressError::InvalidLength { .. } => 1,
            AddressError::NotApplicable { .. } | AddressError::UnknownNetwork(_) => 0,
        }
    }
}

/// Inconsistencies found while auditing the prefix registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Several networks accept the same prefix under one codec family and
    /// nothing declares how they are told apart.
    #[error("prefix {prefix:#04x} ({family}) is shared by {networks:?} without a declared disambiguation")]
    UndeclaredSharedPrefix {
        family: Family,
        prefix: u8,
        networks: Vec<NetworkId>,
    },

    /// A declared shared prefix no longer matches the rule table.
    #[error("declared shared prefix {prefix:#04x} ({family}) for {declared:?} but the table has {actual:?}")]
    StaleSharedPrefix {
        family: Family,
        prefix: u8,
        declared: Vec<NetworkId>,
        actual: Vec<NetworkId>,
    },
}
