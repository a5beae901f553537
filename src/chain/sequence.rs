use tokio::sync::MutexGuard;

use crate::chain::bridge_client::BridgeClient;
use crate::chain::error::BridgeError;

/// Signer account state owned by the broadcast guard
#[derive(Debug, Default)]
pub(crate) struct AccountState {
    pub(crate) account_number: u64,
    pub(crate) sequence: u64,
    pub(crate) loaded: bool,
}

/// Exclusive right to broadcast with the current sequence number.
///
/// While a lease is alive no other caller can read the sequence, so two
/// broadcasts can never claim the same number.
pub struct SequenceLease<'a> {
    client: &'a BridgeClient,
    state: MutexGuard<'a, AccountState>,
}

impl<'a> SequenceLease<'a> {
    pub(crate) fn new(client: &'a BridgeClient, state: MutexGuard<'a, AccountState>) -> Self {
        Self { client, state }
    }

    pub fn account_number(&self) -> u64 {
        self.state.account_number
    }

    pub fn sequence(&self) -> u64 {
        self.state.sequence
    }

    /// The chain accepted a transaction at this sequence. Returns the next one.
    pub fn confirm(mut self) -> u64 {
        self.state.sequence += 1;
        self.state.sequence
    }

    /// Reload account number and sequence from the chain
    pub async fn refresh(&mut self) -> Result<u64, BridgeError> {
        let (account_number, sequence) = self.client.account_number_and_sequence().await?;
        self.state.account_number = account_number;
        self.state.sequence = sequence;
        self.state.loaded = true;
        Ok(sequence)
    }

    /// Recover from a rejected broadcast. Adopts the sequence the chain asked
    /// for when the log names it, otherwise refetches the account.
    pub async fn resync(&mut self, raw_log: &str) -> Result<u64, BridgeError> {
        match parse_sequence_error(raw_log) {
            Some(expected) => {
                log::info!("Chain expects sequence {} (had {})", expected, self.state.sequence);
                self.state.sequence = expected;
                Ok(expected)
            }
            None => self.refresh().await,
        }
    }

    /// Make the next lease reload the account from the chain
    pub fn invalidate(mut self) {
        self.state.loaded = false;
    }
}

/// Extract X from "account sequence mismatch, expected X, got Y"
pub fn parse_sequence_error(error_msg: &str) -> Option<u64> {
    if !error_msg.contains("sequence") {
        return None;
    }
    let start = error_msg.find("expected ")?;
    let remaining = &error_msg[start + "expected ".len()..];
    let end = remaining
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(remaining.len());
    remaining[..end].parse().ok()
}
