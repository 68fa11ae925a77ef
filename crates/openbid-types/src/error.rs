//! Error types for the OpenBid auction engine.
//!
//! All errors use the `OB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Bidder eligibility
//! - 2xx: Bid parsing
//! - 3xx: Escrow / fund reservation
//! - 4xx: Auction state
//! - 6xx: Settlement
//! - 9xx: General / internal
//!
//! Every 1xx–3xx error is terminal for the single bid attempt that produced
//! it and leaves ledger and auction state untouched. The caller translates
//! the structured reason into user-facing text; no message rendering
//! happens in this workspace.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AuctionId, SafeMoney};

/// Central error enum for all OpenBid operations.
#[derive(Debug, Error)]
pub enum OpenbidError {
    // =================================================================
    // Bidder Eligibility (1xx)
    // =================================================================
    /// The bidding identity could not be resolved.
    #[error("OB_ERR_100: No resolvable bidder on request")]
    NoBidder,

    /// The bidder is administratively barred from bidding.
    #[error("OB_ERR_101: Bidder is prohibited from participating")]
    Prohibited,

    /// The bidder is not inside the auction's required venue/zone.
    #[error("OB_ERR_102: Bidder is outside the auction venue")]
    OutsideVenue,

    /// The auction owner tried to bid on their own auction while policy
    /// disallows it.
    #[error("OB_ERR_103: Self-bidding on own auction is disabled")]
    SelfBid,

    // =================================================================
    // Bid Parsing (2xx)
    // =================================================================
    /// No amount was supplied and automatic bidding is unavailable
    /// (sealed auction, or `allow_auto_bid` is off).
    #[error("OB_ERR_200: An explicit bid amount is required")]
    BidRequired,

    /// The bid amount token was missing, malformed, zero, or resolved
    /// to a non-positive amount.
    #[error("OB_ERR_201: Invalid bid: {reason}")]
    InvalidBid { reason: String },

    /// The max-bid token was malformed or resolved to a non-positive amount.
    #[error("OB_ERR_202: Invalid max bid: {reason}")]
    InvalidMaxBid { reason: String },

    // =================================================================
    // Escrow / Reservation (3xx)
    // =================================================================
    /// The explicit bid amount exceeds the bidder's ledger balance.
    #[error("OB_ERR_300: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    /// The ledger refused the reservation withdrawal.
    #[error("OB_ERR_301: Cannot allocate funds: withdrawal of {needed} refused")]
    CannotAllocateFunds { needed: Decimal },

    /// The reserved attempt lost the competition check against the
    /// standing leader. Its reserve has already been refunded.
    #[error("OB_ERR_302: Bid too low: {amount} does not raise standing bid {standing}")]
    BidTooLow {
        amount: SafeMoney,
        standing: SafeMoney,
    },

    // =================================================================
    // Auction State (4xx)
    // =================================================================
    /// The targeted auction does not exist.
    #[error("OB_ERR_400: Auction not found: {0}")]
    AuctionNotFound(AuctionId),

    /// Close was requested but no bid ever stood.
    #[error("OB_ERR_401: Auction has no bids: {0}")]
    NoBids(AuctionId),

    // =================================================================
    // Settlement (6xx)
    // =================================================================
    /// The fund-conservation invariant broke. Not user-recoverable:
    /// this indicates an accounting defect, never clamped or hidden.
    #[error("OB_ERR_600: Escrow conservation violation: {reason}")]
    ConservationViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OB_ERR_900: Internal error: {0}")]
    Internal(String),
}

impl OpenbidError {
    /// Whether this error leaves all state untouched by contract (the
    /// whole validation/reservation taxonomy of bid rejections).
    #[must_use]
    pub fn is_bid_rejection(&self) -> bool {
        matches!(
            self,
            Self::NoBidder
                | Self::Prohibited
                | Self::OutsideVenue
                | Self::SelfBid
                | Self::BidRequired
                | Self::InvalidBid { .. }
                | Self::InvalidMaxBid { .. }
                | Self::InsufficientFunds { .. }
                | Self::CannotAllocateFunds { .. }
                | Self::BidTooLow { .. }
        )
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenbidError>;
