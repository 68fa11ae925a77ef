//! # openbid-engine
//!
//! **Bid ingress plane**: eligibility gating, bid parsing, fund
//! reservation, live competition resolution, and the sealed-bid queue.
//!
//! ## Architecture
//!
//! 1. **VenueGate**: hard gate — prohibition and location answers
//! 2. **attempt**: the validation → parse → reserve pipeline
//! 3. **resolver**: arbitration between an incoming attempt and the leader
//! 4. **SealedBidLedger**: pending reservations for sealed auctions
//! 5. **AuctionState**: single owner of one auction's bidding state
//! 6. **AuctionHouse**: per-auction critical sections over a shared ledger
//!
//! ## Bid Flow
//!
//! ```text
//! request → VenueGate → parse amount/max → Ledger.withdraw (reserve)
//!         → sealed? queue : resolver → leader slot
//! ```
//!
//! Every reserved unit of currency is held by exactly one [`openbid_types::BidAttempt`]
//! until it is refunded, merged, or settled.

pub mod attempt;
pub mod auction;
pub mod gate;
pub mod house;
pub mod memory_ledger;
pub mod resolver;
pub mod sealed;

pub use attempt::BidRequest;
pub use auction::{AuctionState, ClosedAuction};
pub use gate::{OpenVenue, VenueGate};
pub use house::AuctionHouse;
pub use memory_ledger::MemoryLedger;
pub use resolver::{Resolution, resolve};
pub use sealed::SealedBidLedger;
