use serde::{Serialize, Serializer};
use std::fmt;

/// A two-byte status word closing every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord(u16);

impl StatusWord {
    pub const NO_ERROR: Self = Self(0x9000);
    pub const WRONG_LENGTH: Self = Self(0x6700);
    pub const INS_NOT_SUPPORTED: Self = Self(0x6D00);
    pub const CLA_NOT_SUPPORTED: Self = Self(0x6E00);

    pub const INVALID_TRANSACTION_AMOUNT: Self = Self(0x6A83);
    pub const EXCEED_MAXIMUM_BALANCE: Self = Self(0x6A84);
    pub const NEGATIVE_BALANCE: Self = Self(0x6A85);

    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// SW1 and SW2 in wire order.
    pub const fn to_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn is_success(&self) -> bool {
        *self == Self::NO_ERROR
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

// Serialized as four hex digits, the same as `Display`.
impl Serialize for StatusWord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_four_hex_digits() {
        assert_eq!(StatusWord::NO_ERROR.to_string(), "9000");
        assert_eq!(StatusWord::WRONG_LENGTH.to_string(), "6700");
        assert_eq!(StatusWord::new(0x6a83).to_string(), "6A83");
    }

    #[test]
    fn test_to_bytes_is_big_endian() {
        assert_eq!(StatusWord::NEGATIVE_BALANCE.to_bytes(), [0x6A, 0x85]);
        assert!(StatusWord::NO_ERROR.is_success());
        assert!(!StatusWord::CLA_NOT_SUPPORTED.is_success());
    }
}
