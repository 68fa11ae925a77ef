//! Settlement: turn the winning reservation into payouts.
//!
//! Distribution order, all in ledger currency:
//! 1. refund every losing reservation in full (sealed close reconciliation)
//! 2. resolve the tax rate for the auctioned lot
//! 3. deposit taxes to the configured tax account, if any (in addition
//!    to the deduction, not instead of it)
//! 4. deposit `winning − taxes` to the auction owner
//! 5. refund `reserve − winning` to the winner
//!
//! Taxes come out of the owner's proceeds; the winner pays exactly the
//! winning amount. A negative would-be refund is a reservation accounting
//! defect: the engine reserved less than the bid it accepted. That is
//! surfaced as a fatal [`OpenbidError::ConservationViolation`] before any
//! funds move — clamping it to zero would hide a leak or fabricate money.

use chrono::Utc;
use openbid_types::{
    AuctionId, AuctionPolicy, BidAttempt, BidderHandle, Ledger, OpenbidError, Result,
    SettlementReceipt,
};
use rust_decimal::Decimal;

use crate::tax::resolve_tax_rate;

/// Refund losing sealed reservations in full. Symmetric with the refund
/// a superseded open-format leader receives at bid time.
pub fn reconcile_losers<L: Ledger>(ledger: &mut L, losers: Vec<BidAttempt>) {
    for mut loser in losers {
        let refund = loser.take_reserve();
        ledger.deposit(loser.bidder.id, refund);
        tracing::info!(bid = %loser.id, bidder = %loser.bidder.id, refund = %refund,
            "losing sealed bid refunded");
    }
}

/// Settle a closed auction: refund losers, then distribute the winning
/// reserve between owner, tax account, and winner.
pub fn settle_auction<L: Ledger>(
    ledger: &mut L,
    auction_id: AuctionId,
    owner: &BidderHandle,
    lot: &str,
    policy: &AuctionPolicy,
    mut winner: BidAttempt,
    losers: Vec<BidAttempt>,
) -> Result<SettlementReceipt> {
    reconcile_losers(ledger, losers);

    let winning_amount = winner.amount.to_unsafe();
    let tax_rate = resolve_tax_rate(policy, lot);
    let taxes = if tax_rate > Decimal::ZERO {
        winning_amount * tax_rate / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let reserve_before = winner.reserve();
    let winner_refund = reserve_before - winning_amount;
    if winner_refund < Decimal::ZERO {
        // Nothing has been distributed yet; the defect is reported with
        // the reserve still intact for inspection.
        return Err(OpenbidError::ConservationViolation {
            reason: format!(
                "winning reserve {reserve_before} cannot cover bid {winning_amount} \
                 for {auction_id}"
            ),
        });
    }

    let mut tax_deposit = None;
    if taxes > Decimal::ZERO {
        // The owner is told about the extraction; message rendering is
        // the caller's concern.
        tracing::info!(auction = %auction_id, owner = %owner.id, taxes = %taxes,
            rate = %tax_rate, "end-of-auction tax extracted");
        if let Some(account) = policy.tax_account {
            ledger.deposit(account, taxes);
            tax_deposit = Some(taxes);
        }
    }

    let owner_proceeds = winning_amount - taxes;
    ledger.deposit(owner.id, owner_proceeds);

    // The reserve is drained exactly once; the refund deposit and the
    // zeroing are one step.
    winner.take_reserve();
    ledger.deposit(winner.bidder.id, winner_refund);

    tracing::info!(auction = %auction_id, winner = %winner.bidder.id,
        proceeds = %owner_proceeds, refund = %winner_refund, "auction settled");

    Ok(SettlementReceipt {
        auction_id,
        winner: winner.bidder,
        winning_amount,
        tax_rate,
        taxes,
        owner_proceeds,
        tax_deposit,
        winner_refund,
        reserve_before,
        settled_at: Utc::now(),
    })
}
