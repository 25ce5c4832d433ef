//! # Donation Status Graph
//!
//! ## States
//!
//! ```text
//! Pending ──▶ Accepted ──▶ PickedUp ──▶ Delivered (terminal)
//!    │
//!    ▼
//! Cancelled (terminal)
//! ```
//!
//! There is no reverse edge and no shortcut other than `Pending → Cancelled`.
//! Self-transitions are not edges.

use std::str::FromStr;

use foodshare_core::FoodshareError;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    /// Created and awaiting acceptance.
    Pending,
    /// Accepted by a receiving organisation.
    Accepted,
    /// Collected from the donor.
    PickedUp,
    /// Handed over to the recipient (terminal).
    Delivered,
    /// Withdrawn before acceptance (terminal).
    Cancelled,
}

/// Every edge of the lifecycle graph, as `(from, to)`.
pub const EDGES: [(DonationStatus, DonationStatus); 4] = [
    (DonationStatus::Pending, DonationStatus::Accepted),
    (DonationStatus::Pending, DonationStatus::Cancelled),
    (DonationStatus::Accepted, DonationStatus::PickedUp),
    (DonationStatus::PickedUp, DonationStatus::Delivered),
];

impl DonationStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [DonationStatus; 5] = [
        DonationStatus::Pending,
        DonationStatus::Accepted,
        DonationStatus::PickedUp,
        DonationStatus::Delivered,
        DonationStatus::Cancelled,
    ];

    /// Whether this status has no outgoing edges.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Statuses directly reachable from this one.
    pub fn successors(&self) -> &'static [DonationStatus] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Cancelled],
            Self::Accepted => &[Self::PickedUp],
            Self::PickedUp => &[Self::Delivered],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    /// Whether `(self, target)` is an edge of the graph.
    pub fn can_transition_to(&self, target: DonationStatus) -> bool {
        self.successors().contains(&target)
    }

    /// Every status reachable from `Pending` (including `Pending` itself).
    pub fn reachable_from_pending() -> Vec<DonationStatus> {
        let mut seen = vec![Self::Pending];
        let mut cursor = 0;
        while cursor < seen.len() {
            for next in seen[cursor].successors() {
                if !seen.contains(next) {
                    seen.push(*next);
                }
            }
            cursor += 1;
        }
        seen
    }

    /// Return the wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::PickedUp => "picked_up",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = FoodshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DonationStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| FoodshareError::Parse(format!("unknown donation status {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DonationStatus::*;

    #[test]
    fn test_successors_match_edge_table() {
        for from in DonationStatus::ALL {
            for to in DonationStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    EDGES.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_successors() {
        for st in DonationStatus::ALL {
            assert_eq!(st.is_terminal(), st.successors().is_empty(), "{st}");
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for st in DonationStatus::ALL {
            assert!(!st.can_transition_to(st));
        }
    }

    #[test]
    fn test_no_regression_edges() {
        let order = |s: DonationStatus| DonationStatus::ALL.iter().position(|x| *x == s);
        for (from, to) in EDGES {
            assert!(order(to) > order(from), "{from} -> {to} regresses");
        }
    }

    #[test]
    fn test_every_status_is_reachable() {
        let reachable = DonationStatus::reachable_from_pending();
        assert_eq!(reachable.len(), DonationStatus::ALL.len());
        assert_eq!(reachable[0], Pending);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(PickedUp.to_string(), "picked_up");
        assert_eq!(serde_json::to_string(&PickedUp).unwrap(), "\"picked_up\"");
        assert_eq!("cancelled".parse::<DonationStatus>().unwrap(), Cancelled);
        assert!("shipped".parse::<DonationStatus>().is_err());
    }
}
