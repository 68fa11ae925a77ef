//! End-of-auction tax rate resolution.
//!
//! The tax schedule is an ordered list of (lot matcher, raw rate) rows.
//! Resolution is a first-match-wins linear scan: the first row whose lot
//! matches ends the scan whether or not its rate is usable. A rate that
//! does not end in `%`, or whose number does not parse, keeps the default
//! rate in force — a no-op, never an error.

use openbid_types::AuctionPolicy;
use rust_decimal::Decimal;

/// Resolve the tax percentage applicable to `lot` under `policy`.
#[must_use]
pub fn resolve_tax_rate(policy: &AuctionPolicy, lot: &str) -> Decimal {
    let mut rate = policy.end_tax_percent;
    for rule in &policy.tax_schedule {
        if rule.lot == lot {
            if let Some(stripped) = rule.rate.strip_suffix('%') {
                if let Ok(parsed) = stripped.trim().parse::<Decimal>() {
                    rate = parsed;
                }
                // Unparsable number: the default stays in force.
            }
            // Only the first matching row is ever considered.
            break;
        }
    }
    rate
}
