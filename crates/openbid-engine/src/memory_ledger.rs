//! In-memory [`Ledger`] implementation.
//!
//! The production banking subsystem lives outside this workspace; this
//! implementation backs the test suites and simple embeddings. All
//! mutations are atomic: either the full operation succeeds or the
//! balance is unchanged.

use std::collections::HashMap;

use openbid_types::{BidderId, Ledger};
use rust_decimal::Decimal;

/// Per-account balances with all-or-nothing withdrawal.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: HashMap<BidderId, Decimal>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Seed an account with funds.
    pub fn fund(&mut self, account: BidderId, amount: Decimal) {
        *self.balances.entry(account).or_insert(Decimal::ZERO) += amount;
    }

    /// Sum of all account balances.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.balances.values().copied().sum()
    }
}

impl Ledger for MemoryLedger {
    fn withdraw(&mut self, account: BidderId, amount: Decimal) -> bool {
        match self.balances.get_mut(&account) {
            Some(balance) if *balance >= amount => {
                *balance -= amount;
                true
            }
            _ => false,
        }
    }

    fn deposit(&mut self, account: BidderId, amount: Decimal) {
        *self.balances.entry(account).or_insert(Decimal::ZERO) += amount;
    }

    fn balance(&self, account: BidderId) -> Decimal {
        self.balances.get(&account).copied().unwrap_or(Decimal::ZERO)
    }
}
