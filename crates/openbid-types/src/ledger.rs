//! The banking-subsystem boundary.
//!
//! The engine consumes the ledger as an atomic withdraw/deposit interface
//! keyed by account identity. Amounts cross this boundary in the ledger's
//! native currency ([`Decimal`]); everything inside the engine is
//! [`crate::SafeMoney`].

use rust_decimal::Decimal;

use crate::BidderId;

/// Atomic account ledger. Implementations live outside the engine core;
/// [`openbid-engine`]'s `MemoryLedger` exists for tests and embedding.
///
/// Contract:
/// - `withdraw` is all-or-nothing: `false` means no funds moved.
/// - `deposit` never fails from the engine's perspective; a backend that
///   can fail must surface that outside this core.
/// - Neither call is assumed to be roll-back-able, which is why the engine
///   orders its own protocol as withdraw-before-mutate and
///   mutate-before-refund.
pub trait Ledger {
    /// Atomically remove `amount` from `account`. Returns `false` on
    /// insufficient funds or backend refusal, with no partial withdrawal.
    fn withdraw(&mut self, account: BidderId, amount: Decimal) -> bool;

    /// Atomically add `amount` to `account`.
    fn deposit(&mut self, account: BidderId, amount: Decimal);

    /// Current balance of `account`.
    fn balance(&self, account: BidderId) -> Decimal;
}
