//! Venue gate — hard gate for bidder eligibility.
//!
//! Prohibition and location checks are owned by external collaborators
//! (permission plugins, zone tracking); the engine consumes them as the
//! single boolean answer each provides. Every bid path goes through the
//! gate before any token is parsed or any fund moves.

use openbid_types::BidderId;

/// Eligibility answers the engine consumes at bid time.
pub trait VenueGate {
    /// Whether the bidder is administratively barred from bidding.
    fn is_prohibited(&self, bidder: BidderId) -> bool;

    /// Whether the bidder is inside the auction's required venue/zone.
    fn in_venue(&self, bidder: BidderId) -> bool;
}

/// Gate that admits everyone. Used in tests and venue-less deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenVenue;

impl VenueGate for OpenVenue {
    fn is_prohibited(&self, _bidder: BidderId) -> bool {
        false
    }

    fn in_venue(&self, _bidder: BidderId) -> bool {
        true
    }
}

#[cfg(test)]
pub(crate) mod test_gates {
    use std::collections::HashSet;

    use super::*;

    /// Configurable gate for exercising each eligibility failure.
    #[derive(Debug, Default)]
    pub struct StubGate {
        pub prohibited: HashSet<BidderId>,
        pub outside: HashSet<BidderId>,
    }

    impl VenueGate for StubGate {
        fn is_prohibited(&self, bidder: BidderId) -> bool {
            self.prohibited.contains(&bidder)
        }

        fn in_venue(&self, bidder: BidderId) -> bool {
            !self.outside.contains(&bidder)
        }
    }
}
