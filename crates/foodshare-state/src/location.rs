//! # Location Visibility
//!
//! Location updates arrive from an external tracking collaborator. The core
//! never stores or relays coordinates; it only answers whether a given
//! update may be shown to a given viewer.

use foodshare_core::{Actor, ActorId, DonationId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;
use crate::gate::gates_for;
use crate::status::DonationStatus;

/// Which end of the hand-over an update describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingSide {
    /// Donor or courier on the collection side.
    Pickup,
    /// The receiving organisation.
    Recipient,
}

/// A single position report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub donation_id: DonationId,
    pub reported_by: ActorId,
    pub side: TrackingSide,
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: Timestamp,
}

impl LocationUpdate {
    /// Build an update, rejecting out-of-range or non-finite coordinates.
    pub fn new(
        donation_id: DonationId,
        reported_by: ActorId,
        side: TrackingSide,
        latitude: f64,
        longitude: f64,
        recorded_at: Timestamp,
    ) -> Result<Self, LifecycleError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LifecycleError::Validation(format!(
                "latitude {latitude} out of range"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LifecycleError::Validation(format!(
                "longitude {longitude} out of range"
            )));
        }
        Ok(Self {
            donation_id,
            reported_by,
            side,
            latitude,
            longitude,
            recorded_at,
        })
    }
}

/// Whether `viewer` may see `update` for a donation currently in `status`.
///
/// A viewer always sees their own share while tracking is visible. Anyone
/// else's share is visible only to roles that see the recipient side.
pub fn location_visible(update: &LocationUpdate, viewer: &Actor, status: DonationStatus) -> bool {
    let gates = gates_for(status, viewer.role);
    if !gates.tracking_visible {
        return false;
    }
    viewer.is(&update.reported_by) || gates.tracking_shows_recipient_location
}
