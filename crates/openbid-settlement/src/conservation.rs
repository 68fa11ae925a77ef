//! Escrow conservation auditor.
//!
//! Invariant enforced over one auction's lifetime:
//! ```text
//! Σ(engine withdrawals) − Σ(engine deposits) == Σ(live reserves)
//! ```
//! at every observation point. A mismatch means funds leaked or were
//! fabricated; the auditor reports it as [`OpenbidError::ConservationViolation`],
//! never clamps it away.

use openbid_types::{BidderId, Ledger, OpenbidError, Result};
use rust_decimal::Decimal;

/// Running totals of the ledger traffic the engine has issued.
#[derive(Debug, Default)]
pub struct EscrowConservation {
    withdrawals: Decimal,
    deposits: Decimal,
}

impl EscrowConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_withdrawal(&mut self, amount: Decimal) {
        self.withdrawals += amount;
    }

    pub fn record_deposit(&mut self, amount: Decimal) {
        self.deposits += amount;
    }

    /// Funds the engine should currently be holding.
    #[must_use]
    pub fn net_escrowed(&self) -> Decimal {
        self.withdrawals - self.deposits
    }

    #[must_use]
    pub fn total_withdrawals(&self) -> Decimal {
        self.withdrawals
    }

    #[must_use]
    pub fn total_deposits(&self) -> Decimal {
        self.deposits
    }

    /// Verify the invariant against the live reserve total.
    pub fn verify(&self, live_reserves: Decimal) -> Result<()> {
        let expected = self.net_escrowed();
        if live_reserves != expected {
            return Err(OpenbidError::ConservationViolation {
                reason: format!(
                    "live reserves {live_reserves} != net escrowed {expected} \
                     (withdrawals={}, deposits={})",
                    self.withdrawals, self.deposits,
                ),
            });
        }
        Ok(())
    }
}

/// A [`Ledger`] wrapper that feeds every engine-issued withdrawal and
/// deposit into an [`EscrowConservation`] auditor.
#[derive(Debug)]
pub struct AuditedLedger<L> {
    inner: L,
    audit: EscrowConservation,
}

impl<L: Ledger> AuditedLedger<L> {
    #[must_use]
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            audit: EscrowConservation::new(),
        }
    }

    #[must_use]
    pub fn audit(&self) -> &EscrowConservation {
        &self.audit
    }

    #[must_use]
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Ledger> Ledger for AuditedLedger<L> {
    fn withdraw(&mut self, account: BidderId, amount: Decimal) -> bool {
        let ok = self.inner.withdraw(account, amount);
        if ok {
            self.audit.record_withdrawal(amount);
        }
        ok
    }

    fn deposit(&mut self, account: BidderId, amount: Decimal) {
        self.audit.record_deposit(amount);
        self.inner.deposit(account, amount);
    }

    fn balance(&self, account: BidderId) -> Decimal {
        self.inner.balance(account)
    }
}
