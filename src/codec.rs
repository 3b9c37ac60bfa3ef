//! Base-62 shortcode codec
//!
//! Converts store-assigned numeric identifiers into compact public shortcodes
//! and back. The alphabet is fixed: digits, then uppercase, then lowercase,
//! so `0` is the zero symbol and `z` is 61.
//!
//! The mapping is a bijection between `u64` values and alphabet strings with
//! no leading zero symbol (except the single-character `"0"`).

use thiserror::Error;

/// Identifier assigned to a link by the store
pub type LinkId = u64;

/// Ordered 62-symbol alphabet used for shortcodes
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u64 = 62;

/// Errors produced while decoding a shortcode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The shortcode was the empty string
    #[error("shortcode is empty")]
    Empty,

    /// A character outside `[0-9A-Za-z]` was found
    #[error("invalid base62 character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// The shortcode denotes a value larger than `u64::MAX`
    #[error("shortcode is out of range")]
    Overflow,
}

/// Encodes an identifier as a base-62 shortcode
///
/// # Example
///
/// ```
/// # use urlshort::codec::encode;
/// assert_eq!(encode(0), "0");
/// assert_eq!(encode(61), "z");
/// assert_eq!(encode(62), "10");
/// ```
pub fn encode(id: LinkId) -> String {
    if id == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut symbols = Vec::with_capacity(11);
    let mut n = id;
    while n > 0 {
        symbols.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    // Remainders come out least-significant first
    symbols.reverse();

    symbols.into_iter().map(char::from).collect()
}

/// Decodes a base-62 shortcode back into its identifier
///
/// Fails on the first character outside the alphabet without returning a
/// partial value. Leading zero symbols are tolerated (`"01"` decodes to 1)
/// but `encode` never produces them.
pub fn decode(code: &str) -> Result<LinkId, DecodeError> {
    if code.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut result: u64 = 0;
    for (position, ch) in code.chars().enumerate() {
        let value = symbol_value(ch).ok_or(DecodeError::InvalidCharacter { ch, position })?;
        result = result
            .checked_mul(BASE)
            .and_then(|r| r.checked_add(value))
            .ok_or(DecodeError::Overflow)?;
    }

    Ok(result)
}

fn symbol_value(ch: char) -> Option<u64> {
    match ch {
        '0'..='9' => Some(ch as u64 - '0' as u64),
        'A'..='Z' => Some(ch as u64 - 'A' as u64 + 10),
        'a'..='z' => Some(ch as u64 - 'a' as u64 + 36),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_vectors() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(1), "1");
        assert_eq!(encode(10), "A");
        assert_eq!(encode(36), "a");
        assert_eq!(encode(61), "z");
        assert_eq!(encode(62), "10");
        assert_eq!(encode(3843), "zz");
        assert_eq!(encode(u64::MAX), "LygHa16AHYF");
    }

    #[test]
    fn decodes_known_vectors() {
        assert_eq!(decode("0"), Ok(0));
        assert_eq!(decode("z"), Ok(61));
        assert_eq!(decode("10"), Ok(62));
        assert_eq!(decode("zzz"), Ok(238_327));
        assert_eq!(decode("LygHa16AHYF"), Ok(u64::MAX));
    }

    #[test]
    fn round_trip_across_range() {
        let mut n: u64 = 0;
        while n <= 1_000_000_000_000 {
            assert_eq!(decode(&encode(n)), Ok(n), "round trip failed for {n}");
            n = n * 3 + 1;
        }
        for n in [61, 62, 63, 3843, 3844, 999_999_999_999, 1_000_000_000_000] {
            assert_eq!(decode(&encode(n)), Ok(n));
        }
    }

    #[test]
    fn no_leading_zero_symbol() {
        for n in 1..10_000u64 {
            assert!(!encode(n).starts_with('0'), "{n} encoded with leading zero");
        }
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert_eq!(
            decode("ab-c"),
            Err(DecodeError::InvalidCharacter { ch: '-', position: 2 })
        );
        assert!(matches!(decode("héllo"), Err(DecodeError::InvalidCharacter { .. })));
        assert!(matches!(decode(" 1"), Err(DecodeError::InvalidCharacter { .. })));
        assert!(matches!(decode("a/b"), Err(DecodeError::InvalidCharacter { .. })));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(decode(""), Err(DecodeError::Empty));
    }

    #[test]
    fn rejects_overflow() {
        // one past u64::MAX
        assert_eq!(decode("LygHa16AHYG"), Err(DecodeError::Overflow));
        assert_eq!(decode("zzzzzzzzzzzz"), Err(DecodeError::Overflow));
    }
}
