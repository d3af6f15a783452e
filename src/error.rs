use crate::domain::status::StatusWord;
use thiserror::Error;

/// Reasons a command is rejected by the wallet.
///
/// Every variant is terminal for the current command only. The balance is
/// never touched on any of these paths.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletError {
    #[error("class byte {cla:#04x} is not supported")]
    ClassNotSupported { cla: u8 },
    #[error("instruction byte {ins:#04x} is not supported")]
    InstructionNotSupported { ins: u8 },
    #[error("wrong length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("transaction amount {0} is outside 0..=127")]
    InvalidTransactionAmount(i16),
    #[error("balance would exceed the maximum")]
    ExceedMaximumBalance,
    #[error("balance would become negative")]
    NegativeBalance,
}

impl WalletError {
    /// The status word reported to the terminal for this rejection.
    pub fn status_word(&self) -> StatusWord {
        match self {
            WalletError::ClassNotSupported { .. } => StatusWord::CLA_NOT_SUPPORTED,
            WalletError::InstructionNotSupported { .. } => StatusWord::INS_NOT_SUPPORTED,
            WalletError::WrongLength { .. } => StatusWord::WRONG_LENGTH,
            WalletError::InvalidTransactionAmount(_) => StatusWord::INVALID_TRANSACTION_AMOUNT,
            WalletError::ExceedMaximumBalance => StatusWord::EXCEED_MAXIMUM_BALANCE,
            WalletError::NegativeBalance => StatusWord::NEGATIVE_BALANCE,
        }
    }
}

/// Host-side failures while reading a command script or writing responses.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("invalid hex in field `{field}`: {source}")]
    InvalidHex {
        field: &'static str,
        source: hex::FromHexError,
    },
    #[error("field `{field}` must be exactly one byte, got {len}")]
    NotAByte { field: &'static str, len: usize },
    #[error("command is {0} bytes long, a header needs 5")]
    TruncatedCommand(usize),
    #[error("command data is {0} bytes long, at most 255 fit in a short command")]
    DataTooLong(usize),
}

pub type Result<T> = std::result::Result<T, ScriptError>;
