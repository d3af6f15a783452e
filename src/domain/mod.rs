//! Domain layer: the wallet's value types, the command codec, status words
//! and the channel port the processor talks through.

pub mod balance;
pub mod command;
pub mod ports;
pub mod status;
