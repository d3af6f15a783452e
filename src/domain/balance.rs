use crate::error::WalletError;
use std::fmt;

/// Largest balance the wallet may hold.
pub const MAX_BALANCE: i16 = 0x7FFF;
/// Largest amount a single credit or debit may move.
pub const MAX_TRANSACTION_AMOUNT: i16 = 127;

/// The wallet's monetary value, always within `0..=MAX_BALANCE`.
///
/// The only ways to obtain a different `Balance` from an existing one are
/// [`Balance::credit`] and [`Balance::debit`], both of which return a new
/// value instead of mutating in place. The caller commits the result only on
/// success, so a rejected transaction can never leave a partial update behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Balance(i16);

/// A validated credit or debit amount, within `0..=MAX_TRANSACTION_AMOUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionAmount(i16);

impl TransactionAmount {
    pub fn new(value: i16) -> Result<Self, WalletError> {
        if (0..=MAX_TRANSACTION_AMOUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(WalletError::InvalidTransactionAmount(value))
        }
    }

    /// Interprets a payload byte as a signed quantity, so `0x80..=0xFF`
    /// reads as a negative amount and is rejected.
    pub fn from_wire(byte: u8) -> Result<Self, WalletError> {
        Self::new(i16::from(byte as i8))
    }

    pub fn value(&self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for TransactionAmount {
    type Error = WalletError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Balance {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(MAX_BALANCE);

    pub fn new(value: i16) -> Option<Self> {
        (0..=MAX_BALANCE).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> i16 {
        self.0
    }

    /// Returns the balance after adding `amount`, or `ExceedMaximumBalance`.
    pub fn credit(self, amount: TransactionAmount) -> Result<Self, WalletError> {
        // i32 so that the sum itself cannot wrap before the bound check.
        let sum = i32::from(self.0) + i32::from(amount.0);
        if sum > i32::from(MAX_BALANCE) {
            return Err(WalletError::ExceedMaximumBalance);
        }
        i16::try_from(sum)
            .map(Self)
            .map_err(|_| WalletError::ExceedMaximumBalance)
    }

    /// Returns the balance after subtracting `amount`, or `NegativeBalance`.
    pub fn debit(self, amount: TransactionAmount) -> Result<Self, WalletError> {
        let difference = i32::from(self.0) - i32::from(amount.0);
        if difference < 0 {
            return Err(WalletError::NegativeBalance);
        }
        i16::try_from(difference)
            .map(Self)
            .map_err(|_| WalletError::NegativeBalance)
    }

    /// Big-endian wire form, high byte first.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
