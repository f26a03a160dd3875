//! Nimiq user-friendly addresses: an IBAN with country code `NQ`, two check
//! digits and 32 characters of Nimiq base32.

use std::sync::OnceLock;

use data_encoding::{Encoding, Specification};

use super::{AddressCodec, Family};
use crate::address::CanonicalAddress;
use crate::types::Hash160;
use crate::AddressError;

const ALPHABET: &str = "0123456789ABCDEFGHJKLMNPQRSTUVXY";
const COUNTRY: &str = "NQ";
const BODY_LEN: usize = 32;
const ADDRESS_LEN: usize = 4 + BODY_LEN;

/// ISO 13616 mod-97 over the alphanumeric string, letters counting as 10..35.
fn iban_mod97(s: &str) -> Option<u32> {
    s.chars().try_fold(0u32, |rem, c| {
        let value = c.to_digit(36)?;
        Some(if value < 10 {
            (rem * 10 + value) % 97
        } else {
            (rem * 100 + value) % 97
        })
    })
}

/// Nimiq base32: RFC 4648 bit order over its own alphabet, no padding.
fn base32() -> Option<&'static Encoding> {
    static ENCODING: OnceLock<Option<Encoding>> = OnceLock::new();
    ENCODING
        .get_or_init(|| {
            let mut spec = Specification::new();
            spec.symbols.push_str(ALPHABET);
            spec.encoding().ok()
        })
        .as_ref()
}

pub(crate) fn encode(hash: &Hash160) -> String {
    let body = base32()
        .map(|encoding| encoding.encode(hash.as_bytes()))
        .unwrap_or_default();
    let check = 98 - iban_mod97(&format!("{}{}00", body, COUNTRY)).unwrap_or(0);
    let compact = format!("{}{:02}{}", COUNTRY, check, body);
    compact
        .as_bytes()
        .chunks(4)
        .map(|group| String::from_utf8_lossy(group).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spaces are ignored and letters may be in either case.
#[derive(Debug, Clone, Copy, Default)]
pub struct NimiqCodec;

impl AddressCodec for NimiqCodec {
    fn family(&self) -> Family {
        Family::Nimiq
    }

    fn decode(&self, input: &str) -> Result<CanonicalAddress, AddressError> {
        let family = Family::Nimiq;
        let compact: String = input
            .chars()
            .filter(|c| *c != ' ')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if compact.len() != ADDRESS_LEN || !compact.is_ascii() || !compact.starts_with(COUNTRY) {
            return Err(family.not_applicable());
        }
        let (head, body) = compact.split_at(4);
        if !head[2..].bytes().all(|b| b.is_ascii_digit()) {
            return Err(family.not_applicable());
        }
        let bytes = base32()
            .and_then(|encoding| encoding.decode(body.as_bytes()).ok())
            .ok_or_else(|| family.not_applicable())?;

        if iban_mod97(&format!("{}{}", body, head)) != Some(1) {
            return Err(family.checksum_mismatch());
        }

        Ok(CanonicalAddress::Nimiq(Hash160::try_from(bytes.as_slice())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "NQ86 2H8F YGU5 RM77 QSN9 LYLH C56A CYYR 0MLA";

    #[test]
    fn test_decode() {
        let addr = NimiqCodec.decode(ADDRESS).unwrap();
        match &addr {
            CanonicalAddress::Nimiq(hash) => {
                assert_eq!(hash.to_hex(), "1450ffc385cd4e7c6ac9a7e91614ca67ff90568a")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(addr.to_string(), ADDRESS);
    }

    #[test]
    fn test_spacing_and_case_ignored() {
        let expected = NimiqCodec.decode(ADDRESS).unwrap();
        let compact = ADDRESS.replace(' ', "");
        assert_eq!(NimiqCodec.decode(&compact).unwrap(), expected);
        assert_eq!(NimiqCodec.decode(&compact.to_lowercase()).unwrap(), expected);
    }

    #[test]
    fn test_zero_hash() {
        let zero = CanonicalAddress::Nimiq(Hash160::new([0; 20]));
        assert_eq!(zero.to_string(), "NQ07 0000 0000 0000 0000 0000 0000 0000 0000");
        assert_eq!(NimiqCodec.decode(&zero.to_string()).unwrap(), zero);
    }

    #[test]
    fn test_alphabet_builds() {
        let encoding = base32().unwrap();
        assert_eq!(encoding.encode(&[0xff; 5]), "YYYYYYYY");
        assert_eq!(encoding.decode(b"00000000").unwrap(), [0u8; 5]);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            NimiqCodec.decode("NQ87 2H8F YGU5 RM77 QSN9 LYLH C56A CYYR 0MLA"),
            Err(AddressError::ChecksumMismatch {
                family: Family::Nimiq
            })
        );
        // 'I' and 'O' are not in the alphabet.
        assert!(NimiqCodec.decode("NQ86 2H8F YGU5 RM77 QSN9 LYLH C56A CYYR 0MLI").is_err());
        assert!(NimiqCodec.decode("DE86 2H8F YGU5 RM77 QSN9 LYLH C56A CYYR 0MLA").is_err());
        assert!(NimiqCodec.decode("NQ86").is_err());
        assert!(NimiqCodec.decode("").is_err());
    }
}
