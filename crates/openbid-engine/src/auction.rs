//! Per-auction state: the leader slot and the sealed-bid queue.
//!
//! `AuctionState` is the single owner of the shared mutable bidding state
//! of one auction. Callers never reach into the leader slot or the queue
//! directly; `place_bid`, `cancel_attempt`, and `close` are the only
//! mutation paths, and each runs to completion under the caller's
//! per-auction critical section (see [`crate::house::AuctionHouse`]).

use openbid_types::{
    AuctionId, AuctionPolicy, BidAttempt, BidId, BidderHandle, Ledger, OpenbidError, Result,
};

use crate::attempt::{self, BidRequest};
use crate::gate::VenueGate;
use crate::resolver;
use crate::sealed::SealedBidLedger;

/// One live auction's bidding state.
#[derive(Debug)]
pub struct AuctionState {
    /// This auction's id.
    pub id: AuctionId,
    /// Who is selling.
    pub owner: BidderHandle,
    /// The lot type under the hammer. Matched by the tax schedule.
    pub lot: String,
    /// Resolved policy snapshot.
    pub policy: AuctionPolicy,
    /// Current highest standing bid. Always `None` for sealed auctions.
    leader: Option<BidAttempt>,
    /// Pending reservations for the sealed format.
    sealed_bids: SealedBidLedger,
}

/// The extracted outcome of a closed auction, ready for settlement.
///
/// `losers` is non-empty only for sealed auctions; in the open format
/// every displaced bidder was refunded the moment they were superseded.
#[derive(Debug)]
pub struct ClosedAuction {
    pub id: AuctionId,
    pub owner: BidderHandle,
    pub lot: String,
    pub policy: AuctionPolicy,
    pub winner: BidAttempt,
    pub losers: Vec<BidAttempt>,
}

impl AuctionState {
    #[must_use]
    pub fn new(owner: BidderHandle, lot: impl Into<String>, policy: AuctionPolicy) -> Self {
        Self {
            id: AuctionId::new(),
            owner,
            lot: lot.into(),
            policy,
            leader: None,
            sealed_bids: SealedBidLedger::new(),
        }
    }

    /// The standing leader, if any.
    #[must_use]
    pub fn leader(&self) -> Option<&BidAttempt> {
        self.leader.as_ref()
    }

    /// Number of pending sealed reservations.
    #[must_use]
    pub fn sealed_len(&self) -> usize {
        self.sealed_bids.len()
    }

    /// Total funds this auction currently holds in escrow, in ledger
    /// currency. The conservation invariant compares this against the
    /// net ledger traffic the engine issued.
    #[must_use]
    pub fn escrowed_total(&self) -> rust_decimal::Decimal {
        let queued = self
            .sealed_bids
            .iter()
            .map(BidAttempt::reserve)
            .sum::<rust_decimal::Decimal>();
        queued
            + self
                .leader
                .as_ref()
                .map_or(rust_decimal::Decimal::ZERO, BidAttempt::reserve)
    }

    /// Run one bid through the full pipeline: eligibility, parsing,
    /// reservation, then sealed enqueue or live competition.
    ///
    /// Any pre-reservation failure leaves ledger and auction state
    /// untouched. A competition loss is returned as `BidTooLow` with the
    /// losing reserve already refunded or re-merged.
    pub fn place_bid<L: Ledger, G: VenueGate>(
        &mut self,
        ledger: &mut L,
        gate: &G,
        request: BidRequest,
    ) -> Result<BidId> {
        let bidder = attempt::validate_bidder(gate, &self.owner, &self.policy, request.bidder)?;
        let amount = attempt::resolve_amount(
            ledger,
            &self.policy,
            self.leader.as_ref(),
            &bidder,
            request.amount.as_deref(),
        )?;
        let max_amount = attempt::resolve_max(&self.policy, amount, request.max_amount.as_deref())?;

        let mut incoming = BidAttempt::new(self.id, bidder, amount, max_amount);
        attempt::reserve_funds(
            ledger,
            &mut self.sealed_bids,
            self.leader.as_ref(),
            &mut incoming,
        )?;

        if self.policy.sealed {
            let id = incoming.id;
            tracing::info!(auction = %self.id, bid = %id, "sealed bid queued");
            self.sealed_bids.push(incoming);
            return Ok(id);
        }

        let resolution = resolver::resolve(ledger, self.leader.take(), incoming);
        self.leader = Some(resolution.leader);
        resolution.outcome
    }

    /// Cancel an attempt that has been removed from the standing state.
    ///
    /// Sealed format: the attempt re-enqueues, refund deferred to close
    /// reconciliation. Open format: immediate full refund.
    pub fn cancel_attempt<L: Ledger>(&mut self, ledger: &mut L, mut bid: BidAttempt) {
        if self.policy.sealed {
            self.sealed_bids.cancel(bid);
        } else {
            let refund = bid.take_reserve();
            ledger.deposit(bid.bidder.id, refund);
            tracing::info!(auction = %self.id, bid = %bid.id, refund = %refund,
                "bid cancelled and refunded");
        }
    }

    /// Cancel the standing leader, if any, refunding its reserve.
    pub fn cancel_leading_bid<L: Ledger>(&mut self, ledger: &mut L) -> Option<BidId> {
        let bid = self.leader.take()?;
        let id = bid.id;
        self.cancel_attempt(ledger, bid);
        Some(id)
    }

    /// Close the auction and extract the winner.
    ///
    /// Open format: the leader wins; every displaced bidder was already
    /// refunded. Sealed format: the highest-amount entry wins (first
    /// inserted on ties); the losing entries still hold their reserves
    /// and are returned for close reconciliation.
    pub fn close(mut self) -> Result<ClosedAuction> {
        let (winner, losers) = if self.policy.sealed {
            self.sealed_bids
                .select_winner()
                .ok_or(OpenbidError::NoBids(self.id))?
        } else {
            let winner = self.leader.take().ok_or(OpenbidError::NoBids(self.id))?;
            (winner, Vec::new())
        };
        tracing::info!(auction = %self.id, winner = %winner.bidder.id,
            amount = %winner.amount, "auction closed");
        Ok(ClosedAuction {
            id: self.id,
            owner: self.owner,
            lot: self.lot,
            policy: self.policy,
            winner,
            losers,
        })
    }
}
