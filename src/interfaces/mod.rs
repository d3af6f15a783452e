//! Adapters between the wallet and the outside world: command scripts in,
//! response records out.

pub mod csv;
