//! The classification engine.
//!
//! Walks a network's rule list in order. The first codec whose decode
//! succeeds and passes the network's acceptance check wins; a decode that
//! fails the check falls through to the next codec.

use crate::address::CanonicalAddress;
use crate::rules::rules_for;
use crate::{AddressError, NetworkId};

/// Classify `input` as an address of `network`.
///
/// Returns `None` for anything that is not a valid address of that network,
/// whatever the reason. Never panics.
pub fn classify(network: NetworkId, input: &str) -> Option<CanonicalAddress> {
    diagnose(network, input).ok()
}

/// As [`classify`], but reports why an input was rejected.
///
/// When several codecs fail the most specific failure is returned: a wrong
/// prefix or HRP over a bad checksum over a string of the wrong shape.
/// Acceptance is identical to [`classify`].
pub fn diagnose(network: NetworkId, input: &str) -> Result<CanonicalAddress, AddressError> {
    let mut best: Option<AddressError> = None;

    for rule in rules_for(network) {
        let family = rule.codec.family();
        log::trace!("{}: trying {} for {:?}", network, family, input);

        let err = match rule.codec.decode(input) {
            Ok(address) => match rule.acceptance.check(network, &address) {
                Ok(()) => {
                    log::trace!("{}: accepted as {}", network, family);
                    return Ok(address);
                }
                Err(e) => e,
            },
            Err(e) => e,
        };

        log::trace!("{}: {} rejected: {}", network, family, err);
        if best
            .as_ref()
            .map_or(true, |b| err.specificity() > b.specificity())
        {
            best = Some(err);
        }
    }

    let err = best.unwrap_or_else(|| AddressError::UnknownNetwork(network.to_string()));
    log::debug!("{}: rejected {:?}: {}", network, input, err);
    Err(err)
}

/// Whether `input` is a valid address of `network`.
pub fn is_valid_address(network: NetworkId, input: &str) -> bool {
    classify(network, input).is_some()
}

impl NetworkId {
    /// Classify `input` as an address of this network.
    pub fn address(&self, input: &str) -> Option<CanonicalAddress> {
        classify(*self, input)
    }

    /// Whether `input` is a valid address of this network.
    pub fn is_valid_address(&self, input: &str) -> bool {
        is_valid_address(*self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::Family;

    #[test]
    fn test_segwit_before_legacy() {
        let addr = classify(NetworkId::Bitcoin, "bc1qg82tyqlnsm4f2fqpnj3mehuzvpyrplsdecatk5").unwrap();
        assert_eq!(addr.family(), Family::Segwit);

        let addr = classify(NetworkId::Bitcoin, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").unwrap();
        assert_eq!(addr.family(), Family::Legacy);
    }

    #[test]
    fn test_identifier_mismatch_is_most_specific() {
        // Valid Litecoin segwit: the segwit rule decodes but the HRP is
        // wrong, the legacy rule cannot parse it at all.
        let err = diagnose(NetworkId::Bitcoin, "ltc1qg82tyqlnsm4f2fqpnj3mehuzvpyrplsday80wy")
            .unwrap_err();
        assert_eq!(
            err,
            AddressError::IdentifierMismatch {
                network: NetworkId::Bitcoin,
                found: "hrp \"ltc\"".to_string(),
            }
        );
    }

    #[test]
    fn test_checksum_mismatch_reported() {
        let err = diagnose(NetworkId::Bitcoin, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb").unwrap_err();
        assert_eq!(err, AddressError::ChecksumMismatch { family: Family::Legacy });
    }

    #[test]
    fn test_wrong_prefix_reported() {
        // Dogecoin P2PKH under Bitcoin.
        let err = diagnose(NetworkId::Bitcoin, "DBXu2kgc3xtvCUWFcxFE3r9hEYgmuaaCyD").unwrap_err();
        assert!(matches!(err, AddressError::IdentifierMismatch { .. }));
    }

    #[test]
    fn test_classify_agrees_with_diagnose() {
        let inputs = [
            "",
            "bc1qg82tyqlnsm4f2fqpnj3mehuzvpyrplsdecatk5",
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "not an address",
        ];
        for network in NetworkId::ALL {
            for input in inputs {
                assert_eq!(classify(*network, input), diagnose(*network, input).ok());
            }
        }
    }

    #[test]
    fn test_network_methods() {
        let eth = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert!(NetworkId::Ethereum.is_valid_address(eth));
        assert!(NetworkId::Xdai.address(eth).is_some());
        assert!(!NetworkId::Wanchain.is_valid_address(eth));
        assert!(!is_valid_address(NetworkId::Bitcoin, eth));
    }
}
