//! Test-vector parsing and formatting.
//!
//! A test vector is a string of `'0'`/`'1'` characters whose length must
//! match the length of the scan chain it targets. Bit *i* of the vector
//! corresponds to chain position *i*.

use crate::bit::Bit;

/// Error produced when a test-vector string contains a non-binary character.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid character '{ch}' at position {position} in test vector")]
pub struct VectorParseError {
    /// The offending character.
    pub ch: char,
    /// Zero-based position of the character in the input string.
    pub position: usize,
}

/// Parses a `'0'`/`'1'` string into a bit vector.
pub fn parse_vector(s: &str) -> Result<Vec<Bit>, VectorParseError> {
    s.chars()
        .enumerate()
        .map(|(position, ch)| Bit::from_char(ch).ok_or(VectorParseError { ch, position }))
        .collect()
}

/// Renders a bit vector as a `'0'`/`'1'` string.
pub fn format_vector(bits: &[Bit]) -> String {
    bits.iter().map(|b| b.to_char()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let bits = parse_vector("0110").unwrap();
        assert_eq!(bits, vec![Bit::Zero, Bit::One, Bit::One, Bit::Zero]);
    }

    #[test]
    fn parse_empty() {
        assert_eq!(parse_vector("").unwrap(), Vec::new());
    }

    #[test]
    fn parse_rejects_non_binary() {
        let err = parse_vector("01x0").unwrap_err();
        assert_eq!(err.ch, 'x');
        assert_eq!(err.position, 2);
        assert_eq!(
            err.to_string(),
            "invalid character 'x' at position 2 in test vector"
        );
    }

    #[test]
    fn format_roundtrip() {
        let s = "10011010";
        assert_eq!(format_vector(&parse_vector(s).unwrap()), s);
    }
}
