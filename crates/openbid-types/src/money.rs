//! Safe-money value type and ledger-boundary conversion.
//!
//! The engine does all comparison and arithmetic in [`SafeMoney`], a
//! fixed-point integer unit worth 0.01 of the external ledger currency.
//! The external (ledger) side uses [`Decimal`]. Conversion happens only
//! at the ledger boundary and always truncates toward zero — a conversion
//! can lose a fraction of a cent, but it can never mint one.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Decimal places carried by the external currency.
pub const MONEY_SCALE: u32 = 2;

/// Maximum digits accepted in the integer part of a money token.
/// Matches the bound the strict decimal pattern has always enforced;
/// 13 digits of whole currency stays far inside `i64` cent range.
pub const MAX_TOKEN_INT_DIGITS: usize = 13;

/// Engine-internal money: an integer count of hundredths of the ledger
/// currency. Overflow-bounded, totally ordered, exact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize,
)]
pub struct SafeMoney(pub i64);

impl SafeMoney {
    pub const ZERO: Self = Self(0);

    /// Safe money from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert an external ledger amount into safe money, truncating
    /// toward zero. Returns `None` if the amount would overflow.
    #[must_use]
    pub fn from_unsafe(amount: Decimal) -> Option<Self> {
        let cents = (amount * Decimal::ONE_HUNDRED).trunc();
        cents.to_i64().map(Self)
    }

    /// Convert back to the external ledger currency. Exact.
    #[must_use]
    pub fn to_unsafe(self) -> Decimal {
        Decimal::new(self.0, MONEY_SCALE)
    }

    /// Parse a raw user token under the strict decimal pattern: one to
    /// [`MAX_TOKEN_INT_DIGITS`] digits, optionally followed by a dot and
    /// up to two fraction digits. No sign, no exponent, no separators.
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        let (int_part, frac_part) = match token.split_once('.') {
            Some((i, f)) => (i, f),
            None => (token, ""),
        };
        if int_part.is_empty()
            || int_part.len() > MAX_TOKEN_INT_DIGITS
            || frac_part.len() > MONEY_SCALE as usize
        {
            return None;
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let units: i64 = int_part.parse().ok()?;
        let mut cents: i64 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().ok()?
        };
        if frac_part.len() == 1 {
            cents *= 10;
        }
        Some(Self(units * 100 + cents))
    }

    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Difference, floored at zero. Used where "nothing left to reserve"
    /// is the legitimate answer rather than an error.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0).max(0))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

impl fmt::Display for SafeMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_unsafe())
    }
}
