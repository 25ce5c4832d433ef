//! # Status Change Event
//!
//! Produced exactly once per committed transition and handed to the
//! notification dispatcher. The event carries the ownership facts the
//! recipient policy needs (`donor_id`, `associated_ngo`) so dispatch never
//! has to re-read the donation.

use serde::{Deserialize, Serialize};

use foodshare_core::{ActorId, DonationId, Role, Timestamp};

use crate::donation::Donation;
use crate::status::DonationStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeEvent {
    pub donation_id: DonationId,
    pub from_status: DonationStatus,
    pub to_status: DonationStatus,
    pub actor_id: ActorId,
    pub actor_role: Role,
    pub timestamp: Timestamp,
    pub donor_id: ActorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_ngo: Option<ActorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StatusChangeEvent {
    /// Build the event for the most recent transition of `donation`.
    ///
    /// Returns `None` if the donation has never transitioned.
    pub fn for_latest(donation: &Donation) -> Option<Self> {
        let last = donation.transitions().last()?;
        Some(Self {
            donation_id: donation.id(),
            from_status: last.from,
            to_status: last.to,
            actor_id: last.actor_id.clone(),
            actor_role: last.actor_role,
            timestamp: last.timestamp,
            donor_id: donation.donor_id().clone(),
            associated_ngo: donation.associated_ngo().cloned(),
            reason: last.reason.clone(),
        })
    }
}
