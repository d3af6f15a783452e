use crate::domain::command::{CommandApdu, HEADER_LEN};
use crate::domain::ports::ApduChannel;
use crate::domain::status::StatusWord;
use log::trace;

/// Response length the terminal accepts when it sends `Le = 0x00`.
const MAX_SHORT_RESPONSE: usize = 256;

/// What the terminal gets back for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseApdu {
    pub data: Vec<u8>,
    pub status: StatusWord,
}

/// An in-memory channel carrying a single scripted command.
///
/// Plays the card reader's part: it hands the header to the wallet, delivers
/// whatever data bytes the command physically carries, and collects the
/// response. A command with data has no room for response data, so `ne` is
/// only taken from `P3` when the command carries none.
#[derive(Debug, Clone)]
pub struct ScriptedChannel {
    command: CommandApdu,
    response: Vec<u8>,
}

impl ScriptedChannel {
    pub fn new(command: CommandApdu) -> Self {
        Self {
            command,
            response: Vec::new(),
        }
    }

    pub fn command(&self) -> &CommandApdu {
        &self.command
    }

    /// Closes the exchange. Response data only survives a successful status.
    pub fn into_response(self, status: StatusWord) -> ResponseApdu {
        let data = if status.is_success() {
            self.response
        } else {
            Vec::new()
        };
        ResponseApdu { data, status }
    }
}

impl ApduChannel for ScriptedChannel {
    fn header(&self) -> [u8; HEADER_LEN] {
        self.command.header().encode()
    }

    fn receive(&mut self) -> &[u8] {
        self.command.data()
    }

    fn set_outgoing(&mut self) -> usize {
        if !self.command.data().is_empty() {
            return 0;
        }
        match self.command.header().p3 {
            0 => MAX_SHORT_RESPONSE,
            le => usize::from(le),
        }
    }

    fn send(&mut self, data: &[u8]) {
        trace!("sending {} response bytes", data.len());
        self.response.extend_from_slice(data);
    }
}
