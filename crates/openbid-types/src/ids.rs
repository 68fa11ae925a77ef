//! Globally unique identifiers used throughout OpenBid.
//!
//! All entity IDs use UUIDv7 for time-ordered lexicographic sorting.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AuctionId
// ---------------------------------------------------------------------------

/// Globally unique auction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AuctionId(pub Uuid);

impl AuctionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AuctionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "auction:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// BidderId
// ---------------------------------------------------------------------------

/// Stable unique identifier for a bidder account.
///
/// Identity comparisons in the engine use this ID exclusively; display
/// names are presentation metadata and never participate in equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BidderId(pub Uuid);

impl BidderId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for BidderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BidderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// BidId
// ---------------------------------------------------------------------------

/// Unique identifier for a single bid attempt. UUIDv7, so insertion order
/// is recoverable from the ID itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BidId(pub Uuid);

impl BidId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BidId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bid:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bidder_id_uniqueness() {
        let a = BidderId::new();
        let b = BidderId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn bid_id_ordering_follows_creation() {
        let a = BidId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = BidId::new();
        assert!(a < b);
    }

    #[test]
    fn display_prefixes() {
        let a = AuctionId::new();
        assert!(format!("{a}").starts_with("auction:"));
        let b = BidId::new();
        assert!(format!("{b}").starts_with("bid:"));
    }

    #[test]
    fn serde_roundtrips() {
        let id = BidderId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: BidderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);

        let aid = AuctionId::new();
        let json = serde_json::to_string(&aid).unwrap();
        let back: AuctionId = serde_json::from_str(&json).unwrap();
        assert_eq!(aid, back);
    }
}
