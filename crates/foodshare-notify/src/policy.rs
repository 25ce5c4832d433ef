//! # Recipient Policy
//!
//! | `to_status` | Recipients |
//! |---|---|
//! | accepted | donor |
//! | picked_up | donor, NGO |
//! | delivered | donor, NGO, admin |
//! | cancelled | donor, NGO if one was associated |
//!
//! The NGO is addressed by id when an `ngo` actor accepted the donation,
//! otherwise by role. `cancelled` is only reachable from `pending`, before
//! any NGO can be associated, so in practice it notifies the donor alone.
//!
//! One id may act under several roles, so the donor can also be the
//! accepting NGO. Each recipient appears once, at its first position.

use foodshare_core::Role;
use foodshare_state::{DonationStatus, StatusChangeEvent};

use crate::notification::Recipient;

/// The fixed recipient set for `event`, without duplicates.
pub fn recipients_for(event: &StatusChangeEvent) -> Vec<Recipient> {
    let donor = Recipient::Actor(event.donor_id.clone());
    let ngo = || match &event.associated_ngo {
        Some(id) => Recipient::Actor(id.clone()),
        None => Recipient::Role(Role::Ngo),
    };
    let candidates = match event.to_status {
        DonationStatus::Pending => Vec::new(),
        DonationStatus::Accepted => vec![donor],
        DonationStatus::PickedUp => vec![donor, ngo()],
        DonationStatus::Delivered => vec![donor, ngo(), Recipient::Role(Role::Admin)],
        DonationStatus::Cancelled => {
            let mut out = vec![donor];
            if let Some(id) = &event.associated_ngo {
                out.push(Recipient::Actor(id.clone()));
            }
            out
        }
    };
    let mut out: Vec<Recipient> = Vec::with_capacity(candidates.len());
    for recipient in candidates {
        if !out.contains(&recipient) {
            out.push(recipient);
        }
    }
    out
}
