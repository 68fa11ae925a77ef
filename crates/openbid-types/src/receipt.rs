//! Settlement receipt: the audit record a closed auction produces.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, BidderHandle};

/// Final distribution of a winning reserve.
///
/// Completeness invariant: `owner_proceeds + taxes + winner_refund` equals
/// the winner's reserve at the moment settlement began. [`Self::balances`]
/// checks exactly that; a receipt that fails it documents a defect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// The settled auction.
    pub auction_id: AuctionId,
    /// Who won.
    pub winner: BidderHandle,
    /// Winning amount, in ledger currency.
    pub winning_amount: Decimal,
    /// Tax rate applied (percent).
    pub tax_rate: Decimal,
    /// Taxes extracted from the winning amount.
    pub taxes: Decimal,
    /// Deposited to the auction owner.
    pub owner_proceeds: Decimal,
    /// Deposited to the configured tax account, if any. Informational:
    /// `taxes` was already subtracted from the owner's proceeds whether
    /// or not a destination account exists.
    pub tax_deposit: Option<Decimal>,
    /// Unused reserve returned to the winner.
    pub winner_refund: Decimal,
    /// The winner's reserve before any distribution.
    pub reserve_before: Decimal,
    /// When settlement completed.
    pub settled_at: DateTime<Utc>,
}

impl SettlementReceipt {
    /// Whether the distribution accounts for the entire reserve.
    #[must_use]
    pub fn balances(&self) -> bool {
        self.owner_proceeds + self.taxes + self.winner_refund == self.reserve_before
    }
}
