//! # Role Authorization Table
//!
//! Static mapping from a lifecycle edge to the grants that may trigger it.
//!
//! | Edge | Grants |
//! |---|---|
//! | pending → accepted | ngo, admin |
//! | pending → cancelled | owning donor, admin |
//! | accepted → picked_up | volunteer, admin |
//! | picked_up → delivered | ngo, volunteer, admin |
//!
//! `admin` appears on every row as an explicit grant. There is no bypass
//! path: an edge without a row is denied for every actor, including admins.
//!
//! The `pending → cancelled` row is the only ownership-scoped rule. It is
//! expressed as [`Grant::DonationOwner`], which requires both the `donor`
//! role and identity equality with the donation's `donor_id`. A role-only
//! check would let any donor cancel any donation.

use foodshare_core::{Actor, ActorId, Role};

use crate::status::DonationStatus;

/// A single permission on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// Any actor holding this role.
    AnyOf(Role),
    /// A `donor` actor whose id equals the donation's `donor_id`.
    DonationOwner,
}

impl Grant {
    /// Whether `actor` satisfies this grant for a donation owned by `donor_id`.
    pub fn admits(&self, actor: &Actor, donor_id: &ActorId) -> bool {
        match self {
            Self::AnyOf(role) => actor.role == *role,
            Self::DonationOwner => actor.role == Role::Donor && actor.is(donor_id),
        }
    }
}

impl std::fmt::Display for Grant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnyOf(role) => write!(f, "{role}"),
            Self::DonationOwner => f.write_str("donor (owner)"),
        }
    }
}

/// One row of the table.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    pub from: DonationStatus,
    pub to: DonationStatus,
    pub grants: &'static [Grant],
}

/// Outcome of an authorization lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// The edge exists but no grant admits the actor.
    Denied {
        /// A donor asked for an owner-scoped edge on someone else's donation.
        not_owner: bool,
    },
    /// `(from, to)` has no row.
    NoSuchEdge,
}

static RULES: [TransitionRule; 4] = [
    TransitionRule {
        from: DonationStatus::Pending,
        to: DonationStatus::Accepted,
        grants: &[Grant::AnyOf(Role::Ngo), Grant::AnyOf(Role::Admin)],
    },
    TransitionRule {
        from: DonationStatus::Pending,
        to: DonationStatus::Cancelled,
        grants: &[Grant::DonationOwner, Grant::AnyOf(Role::Admin)],
    },
    TransitionRule {
        from: DonationStatus::Accepted,
        to: DonationStatus::PickedUp,
        grants: &[Grant::AnyOf(Role::Volunteer), Grant::AnyOf(Role::Admin)],
    },
    TransitionRule {
        from: DonationStatus::PickedUp,
        to: DonationStatus::Delivered,
        grants: &[
            Grant::AnyOf(Role::Ngo),
            Grant::AnyOf(Role::Volunteer),
            Grant::AnyOf(Role::Admin),
        ],
    },
];

/// Pure lookup over the static rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationTable;

impl AuthorizationTable {
    /// All rows of the table.
    pub fn rules(&self) -> &'static [TransitionRule] {
        &RULES
    }

    /// The row for `(from, to)`, if the edge is authorized for anyone.
    pub fn rule(&self, from: DonationStatus, to: DonationStatus) -> Option<&'static TransitionRule> {
        RULES.iter().find(|r| r.from == from && r.to == to)
    }

    /// Decide whether `actor` may move a donation owned by `donor_id` from
    /// `from` to `to`.
    pub fn authorize(
        &self,
        from: DonationStatus,
        to: DonationStatus,
        actor: &Actor,
        donor_id: &ActorId,
    ) -> Decision {
        let Some(rule) = self.rule(from, to) else {
            return Decision::NoSuchEdge;
        };
        if rule.grants.iter().any(|g| g.admits(actor, donor_id)) {
            return Decision::Allowed;
        }
        let not_owner = actor.role == Role::Donor
            && rule.grants.contains(&Grant::DonationOwner)
            && !actor.is(donor_id);
        Decision::Denied { not_owner }
    }

    /// Target statuses `actor` may request from `current`.
    pub fn permitted_targets(
        &self,
        current: DonationStatus,
        actor: &Actor,
        donor_id: &ActorId,
    ) -> Vec<DonationStatus> {
        current
            .successors()
            .iter()
            .copied()
            .filter(|to| self.authorize(current, *to, actor, donor_id) == Decision::Allowed)
            .collect()
    }
}
