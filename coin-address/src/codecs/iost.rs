//! IOST account names.

use super::{AddressCodec, Family};
use crate::address::CanonicalAddress;
use crate::AddressError;

const MIN_LEN: usize = 5;
const MAX_LEN: usize = 11;

/// 5 to 11 characters of `[a-z0-9_]`. There is no checksum.
#[derive(Debug, Clone, Copy, Default)]
pub struct IostCodec;

impl AddressCodec for IostCodec {
    fn family(&self) -> Family {
        Family::Iost
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let valid_len = (MIN_LEN..=MAX_LEN).contains(&input.len());
        let valid_chars = input
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
        if !valid_len || !valid_chars {
            return Err(Family::Iost.not_applicable());
        }
        Ok(CanonicalAddress::Iost(input.to_string()))
    }
}
