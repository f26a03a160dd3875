//! Stellar strkey account IDs (`G...`), shared by Kin.

use crc::{Crc, CRC_16_XMODEM};
use data_encoding::BASE32_NOPAD;

use super::{AddressCodec, Family};
use crate::address::CanonicalAddress;
use crate::types::PublicKey32;
use crate::AddressError;

/// Version byte of an ed25519 account ID (6 << 3), which renders as `G`.
const ACCOUNT_ID_VERSION: u8 = 6 << 3;
const DECODED_LEN: usize = 1 + PublicKey32::LEN + 2;
const ENCODED_LEN: usize = 56;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

pub(crate) fn encode(key: &PublicKey32) -> String {
    let mut bytes = Vec::with_capacity(DECODED_LEN);
    bytes.push(ACCOUNT_ID_VERSION);
    bytes.extend_from_slice(key.as_bytes());
    let checksum = CRC16.checksum(&bytes);
    bytes.extend_from_slice(&checksum.to_le_bytes());
    BASE32_NOPAD.encode(&bytes)
}

/// Accepts ed25519 account IDs only; seeds and other strkey versions are
/// not addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct StellarCodec;

impl AddressCodec for StellarCodec {
    fn family(&self) -> Family {
        Family::Stellar
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::Stellar;
        if input.len() != ENCODED_LEN {
            return Err(family.not_applicable());
        }
        let bytes = BASE32_NOPAD
            .decode(input.as_bytes())
            .map_err(|_| family.not_applicable())?;
        if bytes.len() != DECODED_LEN || bytes[0] != ACCOUNT_ID_VERSION {
            return Err(family.not_applicable());
        }
        let (payload, check) = bytes.split_at(DECODED_LEN - 2);
        if CRC16.checksum(payload).to_le_bytes()[..] != *check {
            return Err(family.checksum_mismatch());
        }
        Ok(CanonicalAddress::Stellar(PublicKey32::try_from(&payload[1..])?))
    }
}
