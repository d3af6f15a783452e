//! Command header codec.
//!
//! ```text
//! +-----+-----+-----+-----+-----+-----------------+
//! | CLA | INS | P1  | P2  | P3  | DATA (P3 bytes) |
//! +-----+-----+-----+-----+-----+-----------------+
//!   0     1     2     3     4     5..
//! ```
//!
//! `P3` is the declared data length (`Lc`) for commands carrying data and the
//! expected response length (`Le`) for commands returning data.

use super::ports::ApduChannel;
use crate::error::{Result, ScriptError};
use log::{Level, debug, log_enabled, trace};

pub const HEADER_LEN: usize = 5;
/// Most data bytes a short command can declare.
pub const MAX_DATA_LEN: usize = 255;

pub const OFFSET_CLA: usize = 0;
pub const OFFSET_INS: usize = 1;
pub const OFFSET_P1: usize = 2;
pub const OFFSET_P2: usize = 3;
pub const OFFSET_P3: usize = 4;
pub const OFFSET_CDATA: usize = 5;

/// Class byte of every wallet command.
pub const WALLET_CLA: u8 = 0xB0;
/// Class byte reserved for the host's SELECT handshake.
pub const ISO_CLA: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Credit,
    Debit,
    GetBalance,
    Select,
}

impl Instruction {
    pub const fn as_u8(&self) -> u8 {
        match self {
            Instruction::Credit => 0x30,
            Instruction::Debit => 0x40,
            Instruction::GetBalance => 0x50,
            Instruction::Select => 0xA4,
        }
    }
}

impl TryFrom<u8> for Instruction {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0x30 => Ok(Instruction::Credit),
            0x40 => Ok(Instruction::Debit),
            0x50 => Ok(Instruction::GetBalance),
            0xA4 => Ok(Instruction::Select),
            other => Err(other),
        }
    }
}

/// The fixed five-byte command header.
///
/// Decoding never fails: whether the class and instruction mean anything is
/// decided by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandHeader {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub p3: u8,
}

impl CommandHeader {
    pub fn decode(buf: &[u8; HEADER_LEN]) -> Self {
        Self {
            cla: buf[OFFSET_CLA],
            ins: buf[OFFSET_INS],
            p1: buf[OFFSET_P1],
            p2: buf[OFFSET_P2],
            p3: buf[OFFSET_P3],
        }
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        [self.cla, self.ins, self.p1, self.p2, self.p3]
    }

    pub fn instruction(&self) -> Option<Instruction> {
        Instruction::try_from(self.ins).ok()
    }

    /// The declared data length.
    pub fn declared_len(&self) -> usize {
        usize::from(self.p3)
    }

    /// The host's SELECT handshake, which the wallet lets through untouched.
    pub fn is_select(&self) -> bool {
        self.cla == ISO_CLA && self.ins == Instruction::Select.as_u8()
    }
}

/// Pulls the command data through the channel.
///
/// The returned slice is exactly what the transport delivered. A mismatch
/// with `declared` is left for the caller to judge.
pub fn receive_payload<C: ApduChannel + ?Sized>(channel: &mut C, declared: usize) -> &[u8] {
    let payload = channel.receive();
    if payload.len() != declared {
        debug!(
            "declared {} data bytes, transport delivered {}",
            declared,
            payload.len()
        );
    }
    if log_enabled!(Level::Trace) {
        trace!("payload: {}", hex::encode_upper(payload));
    }
    payload
}

/// A complete command as the terminal sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandApdu {
    header: CommandHeader,
    data: Vec<u8>,
}

impl CommandApdu {
    pub fn new(header: CommandHeader, data: Vec<u8>) -> Result<Self> {
        if data.len() > MAX_DATA_LEN {
            return Err(ScriptError::DataTooLong(data.len()));
        }
        Ok(Self { header, data })
    }

    /// Splits raw bytes into header and data. `P3` is kept as sent, even if
    /// it disagrees with the number of data bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, data) = bytes
            .split_first_chunk::<HEADER_LEN>()
            .ok_or(ScriptError::TruncatedCommand(bytes.len()))?;
        Self::new(CommandHeader::decode(header), data.to_vec())
    }

    pub fn header(&self) -> &CommandHeader {
        &self.header
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.data.len());
        bytes.extend_from_slice(&self.header.encode());
        bytes.extend_from_slice(&self.data);
        bytes
    }
}
