use super::command::HEADER_LEN;

/// The byte-exchange channel between the terminal and the wallet for one
/// command.
///
/// Implementations own the command buffer. The wallet reads the header,
/// pulls the payload at most once, and either sends response data or not.
pub trait ApduChannel {
    /// The five header bytes of the current command.
    fn header(&self) -> [u8; HEADER_LEN];

    /// Pulls the command data from the terminal and returns the bytes that
    /// actually arrived, which may differ from the declared length.
    fn receive(&mut self) -> &[u8];

    /// Switches the channel to outgoing and returns how many response bytes
    /// the terminal is prepared to accept.
    fn set_outgoing(&mut self) -> usize;

    /// Sends response data ahead of the status word.
    fn send(&mut self, data: &[u8]);
}

pub type ApduChannelBox = Box<dyn ApduChannel>;

impl<C: ApduChannel + ?Sized> ApduChannel for Box<C> {
    fn header(&self) -> [u8; HEADER_LEN] {
        (**self).header()
    }

    fn receive(&mut self) -> &[u8] {
        (**self).receive()
    }

    fn set_outgoing(&mut self) -> usize {
        (**self).set_outgoing()
    }

    fn send(&mut self, data: &[u8]) {
        (**self).send(data)
    }
}
