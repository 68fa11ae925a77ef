//! Per-auction policy: already-resolved configuration values.
//!
//! Loading and scoping of configuration is the lifecycle component's
//! concern; the engine consumes the resolved snapshot carried here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BidderId, SafeMoney};

/// One row of the end-of-auction tax schedule.
///
/// The schedule is an *ordered* list scanned linearly; the first row whose
/// `lot` matches the auctioned lot type wins and the scan stops there.
/// The `rate` is kept raw (e.g. `"15%"`) because an unparsable override is
/// defined as a keep-current-rate no-op, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    /// Exact lot-type matcher.
    pub lot: String,
    /// Raw override, expected to end in `%`.
    pub rate: String,
}

impl TaxRule {
    #[must_use]
    pub fn new(lot: impl Into<String>, rate: impl Into<String>) -> Self {
        Self {
            lot: lot.into(),
            rate: rate.into(),
        }
    }
}

/// Resolved policy snapshot for one auction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionPolicy {
    /// Whether a second max-bid token is honored. When off, max-bid
    /// silently equals the bid amount.
    pub allow_max_bids: bool,
    /// Whether a bid with no amount token is auto-resolved against the
    /// current leader.
    pub allow_auto_bid: bool,
    /// Whether the auction owner may bid on their own auction.
    pub allow_self_bid: bool,
    /// Sealed format: bids queue without live comparison until close.
    pub sealed: bool,
    /// Opening price. An auto-bid with no leader starts here.
    pub starting_bid: SafeMoney,
    /// Minimum raise over the standing amount for auto-bids.
    pub min_increment: SafeMoney,
    /// Default end-of-auction tax percentage.
    pub end_tax_percent: Decimal,
    /// Ordered per-lot-type tax overrides. First match wins.
    pub tax_schedule: Vec<TaxRule>,
    /// Account receiving extracted taxes, if any.
    pub tax_account: Option<BidderId>,
}

impl Default for AuctionPolicy {
    fn default() -> Self {
        Self {
            allow_max_bids: true,
            allow_auto_bid: true,
            allow_self_bid: false,
            sealed: false,
            starting_bid: SafeMoney::ZERO,
            min_increment: SafeMoney::from_units(1),
            end_tax_percent: Decimal::ZERO,
            tax_schedule: Vec::new(),
            tax_account: None,
        }
    }
}

impl AuctionPolicy {
    /// Sealed-format policy. Sealed auctions never honor max-bid tokens
    /// and never auto-bid, so those switches are forced off.
    #[must_use]
    pub fn sealed() -> Self {
        Self {
            sealed: true,
            allow_max_bids: false,
            allow_auto_bid: false,
            ..Self::default()
        }
    }
}
