//! Bit regrouping for the bech32-style checksums and for Nano, whose key
//! symbols start at a four-bit offset no base32 codec models.

/// Regroup `data` from `from`-bit to `to`-bit words.
///
/// With `pad` the trailing bits are zero-filled into a final word. Without
/// it, leftover bits must be fewer than `from` and all zero, otherwise the
/// input is rejected.
pub(super) fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value: u32 = (1 << to) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    for &value in data {
        let value = u32::from(value);
        if value >> from != 0 {
            return None;
        }
        acc = (acc << from) | value;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
        acc &= (1 << bits) - 1;
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || (acc << (to - bits)) & max_value != 0 {
        return None;
    }
    Some(out)
}

/// Map each character of `input` to its index in `alphabet`.
pub(super) fn to_symbols(input: &str, alphabet: &[u8; 32]) -> Option<Vec<u8>> {
    input
        .bytes()
        .map(|c| alphabet.iter().position(|&a| a == c).map(|i| i as u8))
        .collect()
}

/// Render 5-bit symbols with `alphabet`.
pub(super) fn from_symbols(symbols: &[u8], alphabet: &[u8; 32]) -> String {
    symbols
        .iter()
        .map(|&s| char::from(alphabet[usize::from(s & 31)]))
        .collect()
}
