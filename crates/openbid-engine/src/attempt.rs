//! Bid attempt construction: validation, parsing, and fund reservation.
//!
//! A raw [`BidRequest`] becomes a reserved [`BidAttempt`] through four
//! short-circuiting steps:
//!
//! 1. eligibility (venue gate, self-bid policy)
//! 2. amount parsing / auto-resolution
//! 3. max-bid parsing
//! 4. reservation (the only step with ledger side effects)
//!
//! Steps 1–3 are pure: any failure returns the structured reason with
//! ledger and auction state untouched. Step 4 withdraws exactly the
//! *new* funds required, crediting any standing reservation the bidder
//! already holds (leader reserve, queued sealed entries) toward the
//! requirement. A refused withdrawal fails the attempt with no partial
//! state: the sealed queue is only folded after the withdrawal succeeds.

use openbid_types::{
    AuctionPolicy, BidAttempt, BidderHandle, Ledger, OpenbidError, Result, SafeMoney,
};

use crate::gate::VenueGate;
use crate::sealed::SealedBidLedger;

/// Raw incoming bid: an optionally-resolved identity plus the verbatim
/// amount tokens supplied by the caller.
#[derive(Debug, Clone)]
pub struct BidRequest {
    /// Resolved bidder identity, or `None` when resolution failed upstream.
    pub bidder: Option<BidderHandle>,
    /// Explicit bid amount token, if supplied.
    pub amount: Option<String>,
    /// Explicit max-bid token, if supplied.
    pub max_amount: Option<String>,
}

impl BidRequest {
    #[must_use]
    pub fn new(bidder: BidderHandle) -> Self {
        Self {
            bidder: Some(bidder),
            amount: None,
            max_amount: None,
        }
    }

    #[must_use]
    pub fn with_amount(mut self, token: impl Into<String>) -> Self {
        self.amount = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_max(mut self, token: impl Into<String>) -> Self {
        self.max_amount = Some(token.into());
        self
    }
}

/// Step 1 — eligibility. Checks identity, prohibition, venue, and the
/// self-bid policy, in that order.
pub(crate) fn validate_bidder<G: VenueGate>(
    gate: &G,
    owner: &BidderHandle,
    policy: &AuctionPolicy,
    bidder: Option<BidderHandle>,
) -> Result<BidderHandle> {
    let Some(bidder) = bidder else {
        return Err(OpenbidError::NoBidder);
    };
    if gate.is_prohibited(bidder.id) {
        return Err(OpenbidError::Prohibited);
    }
    if !gate.in_venue(bidder.id) {
        return Err(OpenbidError::OutsideVenue);
    }
    if bidder.id == owner.id && !policy.allow_self_bid {
        return Err(OpenbidError::SelfBid);
    }
    Ok(bidder)
}

/// Step 2 — amount parsing and auto-resolution.
pub(crate) fn resolve_amount<L: Ledger>(
    ledger: &L,
    policy: &AuctionPolicy,
    leader: Option<&BidAttempt>,
    bidder: &BidderHandle,
    token: Option<&str>,
) -> Result<SafeMoney> {
    let mut amount = match token {
        Some(token) => {
            let Some(amount) = SafeMoney::parse_token(token) else {
                return Err(OpenbidError::InvalidBid {
                    reason: format!("`{token}` is not a valid amount"),
                });
            };
            let available = ledger.balance(bidder.id);
            if amount.to_unsafe() > available {
                return Err(OpenbidError::InsufficientFunds {
                    needed: amount.to_unsafe(),
                    available,
                });
            }
            if amount.is_zero() {
                return Err(OpenbidError::InvalidBid {
                    reason: "amount must be positive".into(),
                });
            }
            amount
        }
        None => {
            if policy.sealed || !policy.allow_auto_bid {
                return Err(OpenbidError::BidRequired);
            }
            SafeMoney::ZERO
        }
    };

    // Auto-resolve a zero amount against the standing state.
    if amount.is_zero() {
        amount = match leader {
            None => {
                // Opening bid: starting bid, or the minimum increment if
                // the auction starts at zero.
                if policy.starting_bid.is_zero() {
                    policy.min_increment
                } else {
                    policy.starting_bid
                }
            }
            // Never auto-raise one's own standing bid.
            Some(current) if current.bidder.id == bidder.id => current.amount,
            Some(current) => current
                .amount
                .checked_add(policy.min_increment)
                .ok_or_else(|| OpenbidError::InvalidBid {
                    reason: "auto-bid overflow".into(),
                })?,
        };
    }

    if !amount.is_positive() {
        return Err(OpenbidError::InvalidBid {
            reason: "resolved amount must be positive".into(),
        });
    }
    Ok(amount)
}

/// Step 3 — max-bid parsing. When the venue disallows max bids, or the
/// auction is sealed, any supplied token is ignored rather than rejected.
pub(crate) fn resolve_max(
    policy: &AuctionPolicy,
    amount: SafeMoney,
    token: Option<&str>,
) -> Result<SafeMoney> {
    if !policy.allow_max_bids || policy.sealed {
        return Ok(amount);
    }
    let mut max = SafeMoney::ZERO;
    if let Some(token) = token {
        max = SafeMoney::parse_token(token).ok_or_else(|| OpenbidError::InvalidMaxBid {
            reason: format!("`{token}` is not a valid max bid"),
        })?;
    }
    max = amount.max(max);
    if !max.is_positive() {
        return Err(OpenbidError::InvalidMaxBid {
            reason: "max bid must be positive".into(),
        });
    }
    Ok(max)
}

/// Step 4 — reservation. Withdraws the new funds this attempt needs and
/// moves any folded sealed reserves onto it.
///
/// The requirement is the attempt's max amount. Credited against it:
/// - the bidder's queued sealed entries (folded out of the queue), and
/// - the bidder's own standing leader reserve (left on the leader here;
///   the competition resolver merges it).
///
/// If the credit already covers the requirement, no withdrawal happens
/// and the reservation trivially succeeds.
pub(crate) fn reserve_funds<L: Ledger>(
    ledger: &mut L,
    queue: &mut SealedBidLedger,
    leader: Option<&BidAttempt>,
    attempt: &mut BidAttempt,
) -> Result<()> {
    let queued = queue.standing_amount(attempt.bidder.id);
    let leading = match leader {
        Some(current) if current.bidder.id == attempt.bidder.id => current.max_amount,
        _ => SafeMoney::ZERO,
    };
    let already_held = queued.checked_add(leading).ok_or_else(|| {
        OpenbidError::Internal("standing reservation overflow".into())
    })?;
    let to_withdraw = attempt.max_amount.saturating_sub(already_held);

    if to_withdraw.is_positive() {
        let needed = to_withdraw.to_unsafe();
        if !ledger.withdraw(attempt.bidder.id, needed) {
            // Nothing was folded yet; the queue and every reserve are
            // exactly as they were.
            return Err(OpenbidError::CannotAllocateFunds { needed });
        }
        attempt.add_reserve(needed);
        tracing::info!(bid = %attempt.id, bidder = %attempt.bidder.id,
            amount = %needed, "reserved new funds");
    }

    // Fold the bidder's queued sealed entries into this attempt.
    for mut folded in queue.drain_bidder(attempt.bidder.id) {
        attempt.add_reserve(folded.take_reserve());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use openbid_types::{AuctionId, BidderId};
    use rust_decimal::Decimal;

    use super::*;
    use crate::gate::OpenVenue;
    use crate::gate::test_gates::StubGate;
    use crate::memory_ledger::MemoryLedger;

    fn handle(name: &str) -> BidderHandle {
        BidderHandle::new(BidderId::new(), name)
    }

    fn leader_bid(bidder: &BidderHandle, amount: i64, max: i64, reserve: i64) -> BidAttempt {
        let mut bid = BidAttempt::new(
            AuctionId::new(),
            bidder.clone(),
            SafeMoney(amount),
            SafeMoney(max),
        );
        bid.add_reserve(Decimal::new(reserve, 2));
        bid
    }

    // -- step 1 -------------------------------------------------------

    #[test]
    fn missing_identity_is_no_bidder() {
        let owner = handle("owner");
        let err =
            validate_bidder(&OpenVenue, &owner, &AuctionPolicy::default(), None).unwrap_err();
        assert!(matches!(err, OpenbidError::NoBidder));
    }

    #[test]
    fn prohibited_bidder_rejected() {
        let owner = handle("owner");
        let bidder = handle("alice");
        let mut gate = StubGate::default();
        gate.prohibited.insert(bidder.id);
        let err = validate_bidder(&gate, &owner, &AuctionPolicy::default(), Some(bidder))
            .unwrap_err();
        assert!(matches!(err, OpenbidError::Prohibited));
    }

    #[test]
    fn bidder_outside_venue_rejected() {
        let owner = handle("owner");
        let bidder = handle("alice");
        let mut gate = StubGate::default();
        gate.outside.insert(bidder.id);
        let err = validate_bidder(&gate, &owner, &AuctionPolicy::default(), Some(bidder))
            .unwrap_err();
        assert!(matches!(err, OpenbidError::OutsideVenue));
    }

    #[test]
    fn owner_self_bid_follows_policy() {
        let owner = handle("owner");
        let err = validate_bidder(
            &OpenVenue,
            &owner,
            &AuctionPolicy::default(),
            Some(owner.clone()),
        )
        .unwrap_err();
        assert!(matches!(err, OpenbidError::SelfBid));

        let policy = AuctionPolicy {
            allow_self_bid: true,
            ..AuctionPolicy::default()
        };
        assert!(validate_bidder(&OpenVenue, &owner, &policy, Some(owner.clone())).is_ok());
    }

    // -- step 2 -------------------------------------------------------

    #[test]
    fn explicit_amount_parses() {
        let mut ledger = MemoryLedger::new();
        let bidder = handle("alice");
        ledger.fund(bidder.id, Decimal::new(1000, 0));
        let amount = resolve_amount(
            &ledger,
            &AuctionPolicy::default(),
            None,
            &bidder,
            Some("150"),
        )
        .unwrap();
        assert_eq!(amount, SafeMoney::from_units(150));
    }

    #[test]
    fn malformed_amount_is_invalid_bid() {
        let ledger = MemoryLedger::new();
        let bidder = handle("alice");
        let err = resolve_amount(
            &ledger,
            &AuctionPolicy::default(),
            None,
            &bidder,
            Some("12x"),
        )
        .unwrap_err();
        assert!(matches!(err, OpenbidError::InvalidBid { .. }));
    }

    #[test]
    fn zero_amount_is_invalid_bid() {
        let ledger = MemoryLedger::new();
        let bidder = handle("alice");
        let err =
            resolve_amount(&ledger, &AuctionPolicy::default(), None, &bidder, Some("0"))
                .unwrap_err();
        assert!(matches!(err, OpenbidError::InvalidBid { .. }));
    }

    #[test]
    fn amount_over_balance_is_insufficient_funds() {
        let mut ledger = MemoryLedger::new();
        let bidder = handle("alice");
        ledger.fund(bidder.id, Decimal::new(100, 0));
        let err = resolve_amount(
            &ledger,
            &AuctionPolicy::default(),
            None,
            &bidder,
            Some("150"),
        )
        .unwrap_err();
        assert!(matches!(err, OpenbidError::InsufficientFunds { .. }));
    }

    #[test]
    fn missing_amount_on_sealed_requires_bid() {
        let ledger = MemoryLedger::new();
        let bidder = handle("alice");
        let err =
            resolve_amount(&ledger, &AuctionPolicy::sealed(), None, &bidder, None).unwrap_err();
        assert!(matches!(err, OpenbidError::BidRequired));
    }

    #[test]
    fn missing_amount_without_auto_bid_requires_bid() {
        let ledger = MemoryLedger::new();
        let bidder = handle("alice");
        let policy = AuctionPolicy {
            allow_auto_bid: false,
            ..AuctionPolicy::default()
        };
        let err = resolve_amount(&ledger, &policy, None, &bidder, None).unwrap_err();
        assert!(matches!(err, OpenbidError::BidRequired));
    }

    #[test]
    fn auto_bid_uses_starting_bid_when_no_leader() {
        let ledger = MemoryLedger::new();
        let bidder = handle("alice");
        let policy = AuctionPolicy {
            starting_bid: SafeMoney::from_units(50),
            ..AuctionPolicy::default()
        };
        let amount = resolve_amount(&ledger, &policy, None, &bidder, None).unwrap();
        assert_eq!(amount, SafeMoney::from_units(50));
    }

    #[test]
    fn auto_bid_uses_min_increment_when_starting_at_zero() {
        let ledger = MemoryLedger::new();
        let bidder = handle("alice");
        let policy = AuctionPolicy {
            starting_bid: SafeMoney::ZERO,
            min_increment: SafeMoney::from_units(100),
            ..AuctionPolicy::default()
        };
        let amount = resolve_amount(&ledger, &policy, None, &bidder, None).unwrap();
        assert_eq!(amount, SafeMoney::from_units(100));
    }

    #[test]
    fn auto_bid_never_raises_own_standing_bid() {
        let ledger = MemoryLedger::new();
        let bidder = handle("alice");
        let leader = leader_bid(&bidder, 15000, 15000, 15000);
        let amount = resolve_amount(
            &ledger,
            &AuctionPolicy::default(),
            Some(&leader),
            &bidder,
            None,
        )
        .unwrap();
        assert_eq!(amount, SafeMoney(15000));
    }

    #[test]
    fn auto_bid_raises_rival_by_min_increment() {
        let ledger = MemoryLedger::new();
        let bidder = handle("alice");
        let rival = handle("bob");
        let leader = leader_bid(&rival, 15000, 15000, 15000);
        let policy = AuctionPolicy {
            min_increment: SafeMoney::from_units(100),
            ..AuctionPolicy::default()
        };
        let amount = resolve_amount(&ledger, &policy, Some(&leader), &bidder, None).unwrap();
        assert_eq!(amount, SafeMoney(25000)); // 150 + 100
    }

    // -- step 3 -------------------------------------------------------

    #[test]
    fn max_token_ignored_when_disallowed() {
        let policy = AuctionPolicy {
            allow_max_bids: false,
            ..AuctionPolicy::default()
        };
        let max = resolve_max(&policy, SafeMoney(100), Some("garbage")).unwrap();
        assert_eq!(max, SafeMoney(100));
    }

    #[test]
    fn max_token_ignored_on_sealed() {
        let max = resolve_max(&AuctionPolicy::sealed(), SafeMoney(100), Some("999")).unwrap();
        assert_eq!(max, SafeMoney(100));
    }

    #[test]
    fn malformed_max_is_invalid_max_bid() {
        let err =
            resolve_max(&AuctionPolicy::default(), SafeMoney(100), Some("1.234")).unwrap_err();
        assert!(matches!(err, OpenbidError::InvalidMaxBid { .. }));
    }

    #[test]
    fn effective_max_never_below_amount() {
        let max = resolve_max(&AuctionPolicy::default(), SafeMoney(500), Some("1")).unwrap();
        assert_eq!(max, SafeMoney(500));

        let max = resolve_max(&AuctionPolicy::default(), SafeMoney(500), Some("10")).unwrap();
        assert_eq!(max, SafeMoney(1000));
    }

    // -- step 4 -------------------------------------------------------

    #[test]
    fn fresh_bidder_reserves_full_max() {
        let mut ledger = MemoryLedger::new();
        let mut queue = SealedBidLedger::new();
        let bidder = handle("alice");
        ledger.fund(bidder.id, Decimal::new(1000, 0));

        let mut attempt = BidAttempt::new(
            AuctionId::new(),
            bidder.clone(),
            SafeMoney::from_units(100),
            SafeMoney::from_units(300),
        );
        reserve_funds(&mut ledger, &mut queue, None, &mut attempt).unwrap();

        assert_eq!(attempt.reserve(), Decimal::new(300, 0));
        assert_eq!(ledger.balance(bidder.id), Decimal::new(700, 0));
    }

    #[test]
    fn standing_leader_reserves_only_the_difference() {
        let mut ledger = MemoryLedger::new();
        let mut queue = SealedBidLedger::new();
        let bidder = handle("alice");
        ledger.fund(bidder.id, Decimal::new(1000, 0));

        let leader = leader_bid(&bidder, 10000, 30000, 30000); // max 300 reserved
        let mut attempt = BidAttempt::new(
            AuctionId::new(),
            bidder.clone(),
            SafeMoney::from_units(100),
            SafeMoney::from_units(500),
        );
        reserve_funds(&mut ledger, &mut queue, Some(&leader), &mut attempt).unwrap();

        // Only the 200 delta is withdrawn; the leader's 300 merges later.
        assert_eq!(attempt.reserve(), Decimal::new(200, 0));
        assert_eq!(ledger.balance(bidder.id), Decimal::new(800, 0));
    }

    #[test]
    fn covered_requirement_withdraws_nothing() {
        let mut ledger = MemoryLedger::new();
        let mut queue = SealedBidLedger::new();
        let bidder = handle("alice");
        ledger.fund(bidder.id, Decimal::new(1000, 0));

        let leader = leader_bid(&bidder, 10000, 50000, 50000);
        let mut attempt = BidAttempt::new(
            AuctionId::new(),
            bidder.clone(),
            SafeMoney::from_units(200),
            SafeMoney::from_units(400),
        );
        reserve_funds(&mut ledger, &mut queue, Some(&leader), &mut attempt).unwrap();

        assert_eq!(attempt.reserve(), Decimal::ZERO);
        assert_eq!(ledger.balance(bidder.id), Decimal::new(1000, 0));
    }

    #[test]
    fn sealed_entries_fold_into_new_attempt() {
        let mut ledger = MemoryLedger::new();
        let mut queue = SealedBidLedger::new();
        let bidder = handle("alice");
        ledger.fund(bidder.id, Decimal::new(1000, 0));

        // First sealed reservation of 200.
        let mut first = BidAttempt::new(
            AuctionId::new(),
            bidder.clone(),
            SafeMoney::from_units(200),
            SafeMoney::from_units(200),
        );
        reserve_funds(&mut ledger, &mut queue, None, &mut first).unwrap();
        queue.push(first);
        assert_eq!(ledger.balance(bidder.id), Decimal::new(800, 0));

        // Re-bid at 300: only the 100 delta leaves the ledger and the
        // queued 200 folds in.
        let mut second = BidAttempt::new(
            AuctionId::new(),
            bidder.clone(),
            SafeMoney::from_units(300),
            SafeMoney::from_units(300),
        );
        reserve_funds(&mut ledger, &mut queue, None, &mut second).unwrap();

        assert_eq!(second.reserve(), Decimal::new(300, 0));
        assert_eq!(ledger.balance(bidder.id), Decimal::new(700, 0));
        assert!(queue.is_empty());
    }

    #[test]
    fn refused_withdrawal_leaves_no_partial_state() {
        let mut ledger = MemoryLedger::new();
        let mut queue = SealedBidLedger::new();
        let bidder = handle("alice");
        ledger.fund(bidder.id, Decimal::new(50, 0));

        // A queued sealed entry that must survive the failure untouched.
        let mut queued = BidAttempt::new(
            AuctionId::new(),
            bidder.clone(),
            SafeMoney::from_units(20),
            SafeMoney::from_units(20),
        );
        queued.add_reserve(Decimal::new(20, 0));
        queue.push(queued);

        let mut attempt = BidAttempt::new(
            AuctionId::new(),
            bidder.clone(),
            SafeMoney::from_units(500),
            SafeMoney::from_units(500),
        );
        let err =
            reserve_funds(&mut ledger, &mut queue, None, &mut attempt).unwrap_err();
        assert!(matches!(err, OpenbidError::CannotAllocateFunds { .. }));

        assert_eq!(attempt.reserve(), Decimal::ZERO);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.standing_amount(bidder.id), SafeMoney::from_units(20));
        assert_eq!(ledger.balance(bidder.id), Decimal::new(50, 0));
    }
}
