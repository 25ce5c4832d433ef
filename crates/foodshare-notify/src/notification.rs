//! # Notifications
//!
//! A notification is addressed either to a concrete actor or to everyone
//! holding a role, depending on whether the lifecycle knows who the
//! interested party is.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodshare_core::{ActorId, DonationId, Role, Timestamp};
use foodshare_state::{DonationStatus, StatusChangeEvent};

/// Who a notification is for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Recipient {
    Actor(ActorId),
    Role(Role),
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Actor(id) => write!(f, "actor:{id}"),
            Self::Role(role) => write!(f, "role:{role}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient: Recipient,
    pub donation_id: DonationId,
    pub status: DonationStatus,
    pub message: String,
    pub created_at: Timestamp,
}

impl Notification {
    /// Build the notification for `recipient` about `event`.
    pub fn for_event(event: &StatusChangeEvent, recipient: Recipient) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            donation_id: event.donation_id,
            status: event.to_status,
            message: message_for(event),
            created_at: Timestamp::now(),
        }
    }
}

fn message_for(event: &StatusChangeEvent) -> String {
    let what = match event.to_status {
        DonationStatus::Pending => "is awaiting acceptance",
        DonationStatus::Accepted => "has been accepted",
        DonationStatus::PickedUp => "has been picked up",
        DonationStatus::Delivered => "has been delivered",
        DonationStatus::Cancelled => "has been cancelled",
    };
    format!(
        "Donation {} {what} by {} {}",
        event.donation_id, event.actor_role, event.actor_id
    )
}
