//! # openbid-settlement
//!
//! **Finality plane**: turns a closed auction's winning reservation into
//! payouts, and audits the escrow conservation invariant.
//!
//! ## Settlement Flow
//!
//! 1. Refund every losing reservation (sealed close reconciliation)
//! 2. Resolve the tax rate for the lot (first-match-wins schedule scan)
//! 3. Deposit taxes to the tax account, proceeds to the owner, and the
//!    unused reserve back to the winner
//! 4. Emit a [`openbid_types::SettlementReceipt`] whose distribution
//!    provably accounts for the entire reserve
//!
//! A winning reserve that cannot cover the winning bid is a fatal
//! conservation violation, reported before any funds move.

pub mod conservation;
pub mod settle;
pub mod tax;

pub use conservation::{AuditedLedger, EscrowConservation};
pub use settle::{reconcile_losers, settle_auction};
pub use tax::resolve_tax_rate;
