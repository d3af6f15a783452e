use crate::domain::balance::{Balance, TransactionAmount};
use crate::domain::command::{CommandHeader, Instruction, WALLET_CLA, receive_payload};
use crate::domain::ports::ApduChannel;
use crate::domain::status::StatusWord;
use crate::error::WalletError;
use log::{debug, info};

/// Where the processor is within one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessorState {
    #[default]
    Idle,
    Dispatching,
    Executing(Instruction),
}

/// The resident wallet.
///
/// `WalletProcessor` exclusively owns the balance. Each call to
/// [`WalletProcessor::process`] runs one command from `Idle` back to `Idle`;
/// nothing but the balance carries over between commands, and the balance
/// only changes after a credit or debit has been fully validated.
#[derive(Debug, Default)]
pub struct WalletProcessor {
    balance: Balance,
    state: ProcessorState,
}

impl WalletProcessor {
    /// Creates a wallet holding a zero balance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installation hook invoked by the host platform.
    ///
    /// The install parameters carry nothing the wallet uses.
    pub fn install(params: &[u8]) -> Self {
        debug!("installing wallet, {} parameter bytes ignored", params.len());
        Self::new()
    }

    /// Resumes a session at a known balance.
    pub fn with_balance(balance: Balance) -> Self {
        Self {
            balance,
            state: ProcessorState::Idle,
        }
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    /// Processes one command and converts the outcome into its status word.
    pub fn handle<C: ApduChannel + ?Sized>(&mut self, channel: &mut C) -> StatusWord {
        match self.process(channel) {
            Ok(()) => StatusWord::NO_ERROR,
            Err(e) => {
                let sw = e.status_word();
                info!("command rejected with {}: {}", sw, e);
                sw
            }
        }
    }

    /// Processes one command read from `channel`.
    pub fn process<C: ApduChannel + ?Sized>(
        &mut self,
        channel: &mut C,
    ) -> Result<(), WalletError> {
        let header = CommandHeader::decode(&channel.header());
        debug!(
            "command CLA={:#04x} INS={:#04x} P3={}",
            header.cla, header.ins, header.p3
        );

        // The host's SELECT handshake is acknowledged without any action.
        if header.is_select() {
            return Ok(());
        }

        if header.cla != WALLET_CLA {
            return Err(WalletError::ClassNotSupported { cla: header.cla });
        }

        self.state = ProcessorState::Dispatching;
        let outcome = self.dispatch(&header, channel);
        self.state = ProcessorState::Idle;
        outcome
    }

    fn dispatch<C: ApduChannel + ?Sized>(
        &mut self,
        header: &CommandHeader,
        channel: &mut C,
    ) -> Result<(), WalletError> {
        match header.instruction() {
            Some(Instruction::GetBalance) => {
                self.enter(Instruction::GetBalance);
                self.send_balance(channel)
            }
            Some(Instruction::Debit) => {
                self.enter(Instruction::Debit);
                let amount = receive_amount(header, channel)?;
                self.debit(amount)
            }
            Some(Instruction::Credit) => {
                self.enter(Instruction::Credit);
                let amount = receive_amount(header, channel)?;
                self.credit(amount)
            }
            _ => Err(WalletError::InstructionNotSupported { ins: header.ins }),
        }
    }

    fn enter(&mut self, instruction: Instruction) {
        debug!("{:?} -> Executing({:?})", self.state, instruction);
        self.state = ProcessorState::Executing(instruction);
    }

    /// Adds `amount` to the balance unless it would exceed the maximum.
    pub fn credit(&mut self, amount: TransactionAmount) -> Result<(), WalletError> {
        self.balance = self.balance.credit(amount)?;
        debug!("credited {}, balance {}", amount.value(), self.balance);
        Ok(())
    }

    /// Takes `amount` from the balance unless it would go negative.
    pub fn debit(&mut self, amount: TransactionAmount) -> Result<(), WalletError> {
        self.balance = self.balance.debit(amount)?;
        debug!("debited {}, balance {}", amount.value(), self.balance);
        Ok(())
    }

    fn send_balance<C: ApduChannel + ?Sized>(&self, channel: &mut C) -> Result<(), WalletError> {
        let bytes = self.balance.to_be_bytes();
        let ne = channel.set_outgoing();
        if ne < bytes.len() {
            return Err(WalletError::WrongLength {
                expected: bytes.len(),
                actual: ne,
            });
        }
        channel.send(&bytes);
        Ok(())
    }
}

/// Reads the single amount byte of a credit or debit.
fn receive_amount<C: ApduChannel + ?Sized>(
    header: &CommandHeader,
    channel: &mut C,
) -> Result<TransactionAmount, WalletError> {
    let payload = receive_payload(channel, header.declared_len());
    let &[byte] = payload else {
        return Err(WalletError::WrongLength {
            expected: 1,
            actual: payload.len(),
        });
    };
    TransactionAmount::from_wire(byte)
}
