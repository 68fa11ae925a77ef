//! Bid competition resolution for non-sealed auctions.
//!
//! The resolver decides whether a freshly reserved attempt supersedes the
//! standing leader. It operates on owned values and returns the surviving
//! leader plus the outcome — two attempts never hold references into each
//! other's reserves. By the time a [`Resolution`] is returned, every
//! displaced or rejected reserve has already been refunded or merged, so
//! the caller can drop the losing attempt without losing funds.
//!
//! Applies to non-sealed auctions only; sealed auctions never compare
//! during bidding.

use openbid_types::{BidAttempt, BidId, Ledger, OpenbidError, Result};

/// The surviving leader after competition, plus who won.
#[derive(Debug)]
pub struct Resolution {
    /// The attempt standing as leader after resolution. Holds every unit
    /// of reserve that is still escrowed for this bidder pair.
    pub leader: BidAttempt,
    /// `Ok(id)` — the incoming attempt leads, carrying the accepted bid's
    /// id. `Err(BidTooLow)` — the incoming attempt lost; its reserve has
    /// been refunded (different bidder) or moved back onto the retained
    /// leader (same bidder).
    pub outcome: Result<BidId>,
}

/// Arbitrate between the standing leader (if any) and a reserved incoming
/// attempt.
pub fn resolve<L: Ledger>(
    ledger: &mut L,
    leader: Option<BidAttempt>,
    mut incoming: BidAttempt,
) -> Resolution {
    let Some(mut current) = leader else {
        // First standing bid: nothing to beat.
        tracing::info!(bid = %incoming.id, bidder = %incoming.bidder.id,
            amount = %incoming.amount, "opening bid accepted");
        return Resolution {
            outcome: Ok(incoming.id),
            leader: incoming,
        };
    };

    if incoming.is_same_bidder(&current) {
        resolve_own_raise(current, incoming)
    } else if incoming.amount >= current.amount {
        // Supersede: the displaced leader is refunded in full. Money
        // never moves between the two bidders' reserves.
        let refund = current.take_reserve();
        ledger.deposit(current.bidder.id, refund);
        tracing::info!(bid = %incoming.id, outbid = %current.id,
            refund = %refund, "leader superseded");
        Resolution {
            outcome: Ok(incoming.id),
            leader: incoming,
        }
    } else {
        // Too low: refund the incoming reserve, keep the leader.
        let standing = current.amount;
        let refund = incoming.take_reserve();
        ledger.deposit(incoming.bidder.id, refund);
        tracing::info!(bid = %incoming.id, refund = %refund, "bid too low, refunded");
        Resolution {
            leader: current,
            outcome: Err(OpenbidError::BidTooLow {
                amount: incoming.amount,
                standing,
            }),
        }
    }
}

/// Same bidder on both sides: merge the reserves onto the incoming
/// attempt (same holder, so no ledger I/O), lift the max, then check the
/// raise. On failure the merged reserve moves back onto the *old*
/// attempt, which survives as leader — the caller discards the new one.
fn resolve_own_raise(mut current: BidAttempt, mut incoming: BidAttempt) -> Resolution {
    incoming.add_reserve(current.take_reserve());

    // Max-bid only ever moves up.
    let merged_max = incoming.max_amount.max(current.max_amount);
    incoming.max_amount = merged_max;
    current.max_amount = merged_max;

    if incoming.amount >= current.amount {
        tracing::info!(bid = %incoming.id, bidder = %incoming.bidder.id,
            amount = %incoming.amount, max = %merged_max, "own bid raised");
        Resolution {
            outcome: Ok(incoming.id),
            leader: incoming,
        }
    } else {
        // Lowering one's own standing bid is never allowed. The old
        // attempt is the surviving holder of the merged reserve.
        current.add_reserve(incoming.take_reserve());
        Resolution {
            outcome: Err(OpenbidError::BidTooLow {
                amount: incoming.amount,
                standing: current.amount,
            }),
            leader: current,
        }
    }
}

#[cfg(test)]
mod tests {
    use openbid_types::{AuctionId, BidderHandle, BidderId, SafeMoney};
    use rust_decimal::Decimal;

    use super::*;
    use crate::memory_ledger::MemoryLedger;

    fn reserved(bidder: &BidderHandle, amount: i64, max: i64) -> BidAttempt {
        let mut bid = BidAttempt::new(
            AuctionId::new(),
            bidder.clone(),
            SafeMoney::from_units(amount),
            SafeMoney::from_units(max),
        );
        bid.add_reserve(Decimal::new(max, 0));
        bid
    }

    #[test]
    fn first_bid_leads_outright() {
        let mut ledger = MemoryLedger::new();
        let alice = BidderHandle::new(BidderId::new(), "alice");
        let bid = reserved(&alice, 100, 100);
        let id = bid.id;

        let res = resolve(&mut ledger, None, bid);
        assert_eq!(res.outcome.unwrap(), id);
        assert_eq!(res.leader.bidder.id, alice.id);
    }

    #[test]
    fn higher_rival_supersedes_and_old_leader_is_refunded() {
        let mut ledger = MemoryLedger::new();
        let alice = BidderHandle::new(BidderId::new(), "alice");
        let bob = BidderHandle::new(BidderId::new(), "bob");

        let old = reserved(&alice, 100, 100);
        let new = reserved(&bob, 150, 150);

        let res = resolve(&mut ledger, Some(old), new);
        assert!(res.outcome.is_ok());
        assert_eq!(res.leader.bidder.id, bob.id);
        assert_eq!(res.leader.reserve(), Decimal::new(150, 0));
        // Alice got her full reserve back.
        assert_eq!(ledger.balance(alice.id), Decimal::new(100, 0));
    }

    #[test]
    fn equal_rival_amount_supersedes() {
        let mut ledger = MemoryLedger::new();
        let alice = BidderHandle::new(BidderId::new(), "alice");
        let bob = BidderHandle::new(BidderId::new(), "bob");

        let res = resolve(
            &mut ledger,
            Some(reserved(&alice, 100, 100)),
            reserved(&bob, 100, 100),
        );
        assert!(res.outcome.is_ok());
        assert_eq!(res.leader.bidder.id, bob.id);
    }

    #[test]
    fn low_rival_is_rejected_and_refunded() {
        let mut ledger = MemoryLedger::new();
        let alice = BidderHandle::new(BidderId::new(), "alice");
        let bob = BidderHandle::new(BidderId::new(), "bob");

        let old = reserved(&alice, 200, 200);
        let new = reserved(&bob, 150, 150);

        let res = resolve(&mut ledger, Some(old), new);
        assert!(matches!(
            res.outcome,
            Err(OpenbidError::BidTooLow { .. })
        ));
        assert_eq!(res.leader.bidder.id, alice.id);
        assert_eq!(res.leader.reserve(), Decimal::new(200, 0));
        // Bob's reserve came straight back.
        assert_eq!(ledger.balance(bob.id), Decimal::new(150, 0));
    }

    #[test]
    fn own_raise_merges_reserves_without_ledger_io() {
        let mut ledger = MemoryLedger::new();
        let alice = BidderHandle::new(BidderId::new(), "alice");

        let old = reserved(&alice, 100, 300); // 300 reserved
        let mut new = BidAttempt::new(
            old.auction_id,
            alice.clone(),
            SafeMoney::from_units(200),
            SafeMoney::from_units(500),
        );
        new.add_reserve(Decimal::new(200, 0)); // delta only

        let res = resolve(&mut ledger, Some(old), new);
        assert!(res.outcome.is_ok());
        assert_eq!(res.leader.amount, SafeMoney::from_units(200));
        assert_eq!(res.leader.max_amount, SafeMoney::from_units(500));
        assert_eq!(res.leader.reserve(), Decimal::new(500, 0));
        // No deposits were issued.
        assert_eq!(ledger.total(), Decimal::ZERO);
    }

    #[test]
    fn own_raise_to_same_amount_is_accepted() {
        // How a max-bid gets lifted without raising the visible bid.
        let mut ledger = MemoryLedger::new();
        let alice = BidderHandle::new(BidderId::new(), "alice");

        let old = reserved(&alice, 100, 100);
        let mut new = BidAttempt::new(
            old.auction_id,
            alice.clone(),
            SafeMoney::from_units(100),
            SafeMoney::from_units(400),
        );
        new.add_reserve(Decimal::new(300, 0));

        let res = resolve(&mut ledger, Some(old), new);
        assert!(res.outcome.is_ok());
        assert_eq!(res.leader.amount, SafeMoney::from_units(100));
        assert_eq!(res.leader.max_amount, SafeMoney::from_units(400));
        assert_eq!(res.leader.reserve(), Decimal::new(400, 0));
    }

    #[test]
    fn own_lowering_rejected_and_old_attempt_keeps_merged_reserve() {
        let mut ledger = MemoryLedger::new();
        let alice = BidderHandle::new(BidderId::new(), "alice");

        let old = reserved(&alice, 200, 300);
        let old_id = old.id;
        let mut new = BidAttempt::new(
            old.auction_id,
            alice.clone(),
            SafeMoney::from_units(150),
            SafeMoney::from_units(350),
        );
        new.add_reserve(Decimal::new(50, 0));

        let res = resolve(&mut ledger, Some(old), new);
        assert!(matches!(
            res.outcome,
            Err(OpenbidError::BidTooLow { .. })
        ));
        // The OLD attempt survives as the holder of every reserved unit.
        assert_eq!(res.leader.id, old_id);
        assert_eq!(res.leader.amount, SafeMoney::from_units(200));
        assert_eq!(res.leader.reserve(), Decimal::new(350, 0));
        // Merged max is retained even though the raise failed.
        assert_eq!(res.leader.max_amount, SafeMoney::from_units(350));
        assert_eq!(ledger.total(), Decimal::ZERO);
    }
}
