//! The concurrent front door: one critical section per auction.
//!
//! Many bidders hit one shared auction; reservation, comparison, and the
//! leader swap are not safely decomposable, so every mutating operation
//! runs under that auction's own mutex. Independent auctions never
//! serialize against each other. The shared ledger sits behind its own
//! lock, always acquired *inside* an auction section (one fixed order,
//! so the pair of locks cannot deadlock).

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use openbid_types::{AuctionId, BidId, Ledger, OpenbidError, Result};

use crate::attempt::BidRequest;
use crate::auction::{AuctionState, ClosedAuction};
use crate::gate::VenueGate;

/// Registry of live auctions over a shared ledger and venue gate.
pub struct AuctionHouse<L, G> {
    ledger: Mutex<L>,
    gate: G,
    auctions: RwLock<HashMap<AuctionId, Mutex<AuctionState>>>,
}

fn relock<T>(result: std::result::Result<T, PoisonError<T>>) -> T {
    // A poisoned lock means a panic elsewhere; the state itself is
    // still protocol-consistent (every operation completes or fails
    // before releasing), so continue with the inner value.
    result.unwrap_or_else(PoisonError::into_inner)
}

impl<L: Ledger, G: VenueGate> AuctionHouse<L, G> {
    #[must_use]
    pub fn new(ledger: L, gate: G) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            gate,
            auctions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new auction, returning its id.
    pub fn open_auction(&self, auction: AuctionState) -> AuctionId {
        let id = auction.id;
        relock(self.auctions.write()).insert(id, Mutex::new(auction));
        tracing::info!(auction = %id, "auction opened");
        id
    }

    /// Whether an auction is currently registered.
    #[must_use]
    pub fn contains(&self, id: AuctionId) -> bool {
        relock(self.auctions.read()).contains_key(&id)
    }

    /// Place a bid on one auction, atomically with respect to every other
    /// bid on the same auction.
    pub fn place_bid(&self, id: AuctionId, request: BidRequest) -> Result<BidId> {
        let auctions = relock(self.auctions.read());
        let auction = auctions.get(&id).ok_or(OpenbidError::AuctionNotFound(id))?;
        let mut auction = relock(auction.lock());
        let mut ledger = relock(self.ledger.lock());
        auction.place_bid(&mut *ledger, &self.gate, request)
    }

    /// Cancel the standing leader of an auction, refunding its reserve.
    pub fn cancel_leading_bid(&self, id: AuctionId) -> Result<Option<BidId>> {
        let auctions = relock(self.auctions.read());
        let auction = auctions.get(&id).ok_or(OpenbidError::AuctionNotFound(id))?;
        let mut auction = relock(auction.lock());
        let mut ledger = relock(self.ledger.lock());
        Ok(auction.cancel_leading_bid(&mut *ledger))
    }

    /// Remove an auction from the registry and extract its close outcome
    /// for settlement. Fails with `NoBids` (auction stays removed) when
    /// nothing ever stood.
    pub fn close_auction(&self, id: AuctionId) -> Result<ClosedAuction> {
        let auction = relock(self.auctions.write())
            .remove(&id)
            .ok_or(OpenbidError::AuctionNotFound(id))?;
        relock(auction.into_inner()).close()
    }

    /// Run `f` with exclusive access to the shared ledger. Settlement
    /// uses this to distribute a closed auction's proceeds.
    pub fn with_ledger<T>(&self, f: impl FnOnce(&mut L) -> T) -> T {
        let mut ledger = relock(self.ledger.lock());
        f(&mut ledger)
    }
}
