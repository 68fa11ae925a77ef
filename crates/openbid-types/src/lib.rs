//! # openbid-types
//!
//! Shared types, errors, and policy for the **OpenBid** auction engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AuctionId`], [`BidderId`], [`BidId`]
//! - **Money**: [`SafeMoney`] (engine-internal fixed-point) and its
//!   ledger-boundary conversions
//! - **Bid model**: [`BidAttempt`], [`BidderHandle`]
//! - **Policy**: [`AuctionPolicy`], [`TaxRule`]
//! - **Ledger boundary**: the [`Ledger`] trait
//! - **Receipt model**: [`SettlementReceipt`]
//! - **Errors**: [`OpenbidError`] with `OB_ERR_` prefix codes

pub mod bid;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod policy;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use openbid_types::{BidAttempt, SafeMoney, Ledger, ...};

pub use bid::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use money::*;
pub use policy::*;
pub use receipt::*;
