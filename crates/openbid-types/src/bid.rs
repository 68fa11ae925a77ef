//! The bid attempt model: one unit of validated, reserved bidding intent.
//!
//! A [`BidAttempt`] is created per incoming bid request. Its `reserve`
//! field tracks the ledger-currency funds the engine actually holds on
//! behalf of this attempt — no more, and never stale after a transfer.
//! The field is deliberately private: reserve only moves through
//! [`BidAttempt::add_reserve`] / [`BidAttempt::take_reserve`], so every
//! transfer fully drains its source.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, BidId, BidderId, SafeMoney};

/// A bidder's stable identity plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidderHandle {
    /// Stable unique id. The only field identity comparisons use.
    pub id: BidderId,
    /// Display name, carried for reporting only.
    pub display_name: String,
}

impl BidderHandle {
    #[must_use]
    pub fn new(id: BidderId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// A single standing or pending bid with its escrowed funds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidAttempt {
    /// Unique id of this attempt (UUIDv7 — carries insertion order).
    pub id: BidId,
    /// The auction this attempt targets.
    pub auction_id: AuctionId,
    /// Who is bidding.
    pub bidder: BidderHandle,
    /// The current visible bid amount.
    pub amount: SafeMoney,
    /// The ceiling the bidder authorized. Always >= `amount`.
    pub max_amount: SafeMoney,
    /// When the attempt was accepted.
    pub placed_at: DateTime<Utc>,
    /// Ledger-currency funds held in escrow for this attempt.
    reserve: Decimal,
}

impl BidAttempt {
    /// A freshly validated attempt with nothing reserved yet.
    #[must_use]
    pub fn new(
        auction_id: AuctionId,
        bidder: BidderHandle,
        amount: SafeMoney,
        max_amount: SafeMoney,
    ) -> Self {
        Self {
            id: BidId::new(),
            auction_id,
            bidder,
            amount,
            max_amount,
            placed_at: Utc::now(),
            reserve: Decimal::ZERO,
        }
    }

    /// Whether `other` belongs to the same bidder.
    #[must_use]
    pub fn is_same_bidder(&self, other: &Self) -> bool {
        self.bidder.id == other.bidder.id
    }

    /// Attempt to move the visible bid to `new_amount`.
    ///
    /// Accepted only inside `[amount, max_amount]` — a bid never drops
    /// below what already stands and never exceeds its authorized ceiling.
    pub fn raise(&mut self, new_amount: SafeMoney) -> bool {
        if new_amount >= self.amount && new_amount <= self.max_amount {
            self.amount = new_amount;
            true
        } else {
            false
        }
    }

    /// Funds currently held for this attempt.
    #[must_use]
    pub fn reserve(&self) -> Decimal {
        self.reserve
    }

    /// Add escrowed funds onto this attempt.
    pub fn add_reserve(&mut self, amount: Decimal) {
        self.reserve += amount;
    }

    /// Drain the reserve, zeroing it. The caller becomes responsible for
    /// the returned funds (refund deposit, merge onto another attempt,
    /// or settlement distribution).
    pub fn take_reserve(&mut self) -> Decimal {
        std::mem::take(&mut self.reserve)
    }

    /// Whether any funds are still held.
    #[must_use]
    pub fn has_reserve(&self) -> bool {
        !self.reserve.is_zero()
    }
}
