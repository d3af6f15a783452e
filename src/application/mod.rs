//! Application layer containing the wallet's command processing.
//!
//! This module defines the `WalletProcessor` which owns the balance and
//! dispatches each decoded command to its credit, debit or balance handler.

pub mod processor;
