//! Bech32 strings that carry a bare 20-byte key hash (Cosmos SDK chains,
//! Binance Chain, IoTeX).

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};

use super::segwit::bech32_failure;
use super::{AddressCodec, Family};
use crate::address::{Bech32Address, CanonicalAddress};
use crate::types::Hash160;
use crate::AddressError;

const IOTEX_HRP: &str = "io";

/// Decode a classic-bech32 string into its lowercase HRP and key hash.
pub(super) fn decode_hash(input: &str, family: Family) -> Result<(String, Hash160), AddressError> {
    let checked =
        CheckedHrpstring::new::<Bech32>(input).map_err(|_| bech32_failure(input, family))?;
    checked
        .validate_segwit_padding()
        .map_err(|_| family.not_applicable())?;
    let bytes: Vec<u8> = checked.byte_iter().collect();
    let key_hash = Hash160::try_from(bytes.as_slice()).map_err(|_| family.not_applicable())?;
    Ok((checked.hrp().to_lowercase(), key_hash))
}

/// Encode raw bytes as classic bech32 under `hrp`.
pub(crate) fn encode_hash(hrp: &str, bytes: &[u8]) -> String {
    let encoded = Hrp::parse(hrp)
        .ok()
        .and_then(|hrp| bech32::encode::<Bech32>(hrp, bytes).ok());
    match encoded {
        Some(s) => s,
        None => format!("{}:{}", hrp, hex::encode(bytes)),
    }
}

/// Key-hash addresses under any HRP; the HRP is checked by the rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosmosCodec;

impl AddressCodec for CosmosCodec {
    fn family(&self) -> Family {
        Family::CosmosBech32
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let (hrp, key_hash) = decode_hash(input, Family::CosmosBech32)?;
        Ok(CanonicalAddress::Cosmos(Bech32Address { hrp, key_hash }))
    }
}

/// IoTeX `io1...` account addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct IoTeXCodec;

impl AddressCodec for IoTeXCodec {
    fn family(&self) -> Family {
        Family::IoTeX
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let (hrp, key_hash) = decode_hash(input, Family::IoTeX)?;
        if hrp != IOTEX_HRP {
            return Err(Family::IoTeX.not_applicable());
        }
        Ok(CanonicalAddress::IoTeX(key_hash))
    }
}
