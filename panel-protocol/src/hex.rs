//! ASCII hexadecimal helpers
//!
//! Command arguments and the frame length field are ASCII hex. Both
//! upper- and lower-case digits are accepted; encoding is upper-case.

/// Errors from hex decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HexError {
    /// A byte was not `0-9`, `a-f` or `A-F`, or the field was too short
    WrongHexDigit,
}

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Decode a single hex digit
pub fn digit(ch: u8) -> Result<u8, HexError> {
    match ch {
        b'0'..=b'9' => Ok(ch - b'0'),
        b'A'..=b'F' => Ok(ch - b'A' + 10),
        b'a'..=b'f' => Ok(ch - b'a' + 10),
        _ => Err(HexError::WrongHexDigit),
    }
}

/// Decode two hex digits (most significant first)
pub fn byte(digits: &[u8]) -> Result<u8, HexError> {
    match digits {
        [hi, lo, ..] => Ok((digit(*hi)? << 4) | digit(*lo)?),
        _ => Err(HexError::WrongHexDigit),
    }
}

/// Decode four hex digits (most significant first)
pub fn word(digits: &[u8]) -> Result<u16, HexError> {
    if digits.len() < 4 {
        return Err(HexError::WrongHexDigit);
    }
    let hi = byte(&digits[..2])? as u16;
    let lo = byte(&digits[2..4])? as u16;
    Ok((hi << 8) | lo)
}

/// Encode a byte as two upper-case hex digits
pub fn encode_byte(value: u8) -> [u8; 2] {
    [DIGITS[(value >> 4) as usize], DIGITS[(value & 0x0F) as usize]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_digit() {
        assert_eq!(digit(b'0'), Ok(0));
        assert_eq!(digit(b'9'), Ok(9));
        assert_eq!(digit(b'A'), Ok(10));
        assert_eq!(digit(b'f'), Ok(15));
        assert_eq!(digit(b'G'), Err(HexError::WrongHexDigit));
        assert_eq!(digit(b' '), Err(HexError::WrongHexDigit));
    }

    #[test]
    fn test_byte_and_word() {
        assert_eq!(byte(b"0F"), Ok(0x0F));
        assert_eq!(byte(b"a5"), Ok(0xA5));
        assert_eq!(byte(b"5"), Err(HexError::WrongHexDigit));
        assert_eq!(word(b"0FFF"), Ok(0x0FFF));
        assert_eq!(word(b"1234"), Ok(0x1234));
        assert_eq!(word(b"12x4"), Err(HexError::WrongHexDigit));
        assert_eq!(word(b"123"), Err(HexError::WrongHexDigit));
    }

    #[test]
    fn test_encode_is_upper_case() {
        assert_eq!(&encode_byte(0x0A), b"0A");
        assert_eq!(&encode_byte(0xFF), b"FF");
        assert_eq!(&encode_byte(0x37), b"37");
    }

    proptest! {
        #[test]
        fn prop_byte_decodes_encoding(value in any::<u8>()) {
            prop_assert_eq!(byte(&encode_byte(value)), Ok(value));
        }
    }
}
