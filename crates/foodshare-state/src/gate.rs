//! # Side-Effect Gate
//!
//! Read-only policy deciding which auxiliary flows a caller should be shown
//! for a donation in a given status. Needs no engine or store access.

use foodshare_core::Role;
use serde::{Deserialize, Serialize};

use crate::status::DonationStatus;

/// Which auxiliary flows are exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffectGates {
    /// The logistics payment flow is offered.
    pub payment_offered: bool,
    /// Location tracking is shown at all.
    pub tracking_visible: bool,
    /// Tracking includes the recipient-side location.
    pub tracking_shows_recipient_location: bool,
}

/// Evaluate the gates for `role` viewing a donation in `status`.
///
/// - payment only for a `donor` while the donation is `pending`;
/// - tracking for every status except `cancelled` (`delivered` keeps the
///   historical trail);
/// - the recipient side only for `ngo` and `admin`, and never when tracking
///   itself is hidden.
pub fn gates_for(status: DonationStatus, role: Role) -> SideEffectGates {
    let tracking_visible = status != DonationStatus::Cancelled;
    SideEffectGates {
        payment_offered: status == DonationStatus::Pending && role == Role::Donor,
        tracking_visible,
        tracking_shows_recipient_location: tracking_visible
            && matches!(role, Role::Ngo | Role::Admin),
    }
}
