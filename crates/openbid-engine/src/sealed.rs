//! Sealed-bid queue.
//!
//! Sealed auctions accept multiple independent reservations with no live
//! comparison. Accepted attempts are appended here and keep their funds
//! reserved until close. A re-bid from the same bidder does not stack:
//! reservation folds the bidder's queued entries into the new attempt.
//!
//! Cancelling a sealed attempt re-enqueues it instead of refunding —
//! a later re-bid from the same bidder must still be able to find and
//! fold the held reserve; the refund happens during close reconciliation.

use openbid_types::{BidAttempt, BidderId, SafeMoney};

/// Ordered queue of reserved-but-not-yet-compared bids.
#[derive(Debug, Default)]
pub struct SealedBidLedger {
    entries: Vec<BidAttempt>,
}

impl SealedBidLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an accepted attempt.
    pub fn push(&mut self, attempt: BidAttempt) {
        self.entries.push(attempt);
    }

    /// Re-enqueue a cancelled attempt. Its reserve stays held until close.
    pub fn cancel(&mut self, attempt: BidAttempt) {
        tracing::info!(bid = %attempt.id, bidder = %attempt.bidder.id,
            "sealed bid cancelled; refund deferred to close");
        self.entries.push(attempt);
    }

    /// Total standing amount queued for `bidder`, in safe money.
    /// Sealed attempts always have `max_amount == amount`.
    #[must_use]
    pub fn standing_amount(&self, bidder: BidderId) -> SafeMoney {
        self.entries
            .iter()
            .filter(|e| e.bidder.id == bidder)
            .fold(SafeMoney::ZERO, |acc, e| {
                acc.checked_add(e.amount).unwrap_or(acc)
            })
    }

    /// Remove and return every entry belonging to `bidder`, preserving
    /// the order of the rest. Used by reservation to fold a re-bid.
    pub fn drain_bidder(&mut self, bidder: BidderId) -> Vec<BidAttempt> {
        let mut folded = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].bidder.id == bidder {
                folded.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        folded
    }

    /// Close-time winner selection: highest amount wins; on a tie the
    /// first-inserted entry wins. Returns the winner and the losers
    /// (still holding their reserves, to be refunded by reconciliation).
    pub fn select_winner(&mut self) -> Option<(BidAttempt, Vec<BidAttempt>)> {
        if self.entries.is_empty() {
            return None;
        }
        let mut best = 0;
        for (i, entry) in self.entries.iter().enumerate().skip(1) {
            // Strictly greater: an equal later bid never displaces an
            // earlier one.
            if entry.amount > self.entries[best].amount {
                best = i;
            }
        }
        let winner = self.entries.remove(best);
        let losers = std::mem::take(&mut self.entries);
        Some((winner, losers))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the queued attempts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BidAttempt> {
        self.entries.iter()
    }
}
