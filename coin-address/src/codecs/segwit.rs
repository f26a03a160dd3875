//! BIP-173/350 segregated witness addresses.

use bech32::primitives::decode::UncheckedHrpstring;
use bech32::{Bech32, Bech32m, Fe32, Hrp};

use super::{AddressCodec, Family};
use crate::address::{CanonicalAddress, SegwitAddress};
use crate::AddressError;

/// Classify a bech32 decode failure: a well-formed string whose checksum
/// fails under both constants is a checksum mismatch, anything else is not
/// bech32 at all.
pub(super) fn bech32_failure(input: &str, family: Family) -> AddressError {
    match UncheckedHrpstring::new(input) {
        Ok(unchecked)
            if !unchecked.has_valid_checksum::<Bech32>()
                && !unchecked.has_valid_checksum::<Bech32m>() =>
        {
            family.checksum_mismatch()
        }
        _ => family.not_applicable(),
    }
}

/// Encode a witness program.
pub(crate) fn encode(hrp: &str, version: u8, program: &[u8]) -> String {
    let encoded = Hrp::parse(hrp).ok().and_then(|hrp| {
        let version = Fe32::try_from(version).ok()?;
        bech32::segwit::encode(hrp, version, program).ok()
    });
    match encoded {
        Some(s) => s,
        // Only reachable for values that did not come from a decode.
        None => format!("{}:{}:{}", hrp, version, hex::encode(program)),
    }
}

/// Witness programs under any HRP; the HRP is checked by the rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegwitCodec;

impl AddressCodec for SegwitCodec {
    fn family(&self) -> Family {
        Family::Segwit
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let (hrp, version, program) =
            bech32::segwit::decode(input).map_err(|_| bech32_failure(input, Family::Segwit))?;
        Ok(CanonicalAddress::Segwit(SegwitAddress {
            hrp: hrp.to_lowercase(),
            version: version.to_u8(),
            program,
        }))
    }
}
