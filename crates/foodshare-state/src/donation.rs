//! # Donation Record
//!
//! A donation is created once in `Pending` and afterwards only its status,
//! `updated_at`, and the append-only transition log change. Descriptive
//! attributes are public and read widely; the lifecycle fields are private
//! and only the engine in this crate may advance them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use foodshare_core::{Actor, ActorId, DonationId, Role, Timestamp};

use crate::error::LifecycleError;
use crate::status::DonationStatus;

/// Caller-supplied attributes of a donation about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDonation {
    pub food_name: String,
    pub quantity: u32,
    pub quantity_unit: String,
    pub expiry_date: NaiveDate,
    pub pickup_location: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewDonation {
    /// Check the draft against the creation rules, as of `today`.
    ///
    /// All violations are reported together.
    pub fn validate(&self, today: NaiveDate) -> Result<(), LifecycleError> {
        let mut problems = Vec::new();
        if self.food_name.trim().is_empty() {
            problems.push("food_name must not be empty".to_string());
        }
        if self.quantity == 0 {
            problems.push("quantity must be greater than zero".to_string());
        }
        if self.quantity_unit.trim().is_empty() {
            problems.push("quantity_unit must not be empty".to_string());
        }
        if self.pickup_location.trim().is_empty() {
            problems.push("pickup_location must not be empty".to_string());
        }
        if self.expiry_date < today {
            problems.push(format!(
                "expiry_date {} is before {today}",
                self.expiry_date
            ));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(LifecycleError::Validation(problems.join("; ")))
        }
    }
}

/// Record of one committed status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: DonationStatus,
    pub to: DonationStatus,
    pub actor_id: ActorId,
    pub actor_role: Role,
    pub timestamp: Timestamp,
    /// Free-text reason or external reference (e.g. a payment transaction id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A donated-food record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    id: DonationId,
    status: DonationStatus,
    donor_id: ActorId,
    pub food_name: String,
    pub quantity: u32,
    pub quantity_unit: String,
    pub expiry_date: NaiveDate,
    pub pickup_location: String,
    pub description: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    transitions: Vec<TransitionRecord>,
}

impl Donation {
    /// Build a new `Pending` donation owned by `donor`.
    ///
    /// The draft is validated against `now`'s calendar date.
    pub fn create(
        draft: NewDonation,
        donor: &Actor,
        now: Timestamp,
    ) -> Result<Self, LifecycleError> {
        draft.validate(now.date())?;
        Ok(Self {
            id: DonationId::new(),
            status: DonationStatus::Pending,
            donor_id: donor.id.clone(),
            food_name: draft.food_name.trim().to_string(),
            quantity: draft.quantity,
            quantity_unit: draft.quantity_unit.trim().to_string(),
            expiry_date: draft.expiry_date,
            pickup_location: draft.pickup_location.trim().to_string(),
            description: draft.description.filter(|d| !d.trim().is_empty()),
            created_at: now,
            updated_at: now,
            transitions: Vec::new(),
        })
    }

    pub fn id(&self) -> DonationId {
        self.id
    }

    pub fn status(&self) -> DonationStatus {
        self.status
    }

    pub fn donor_id(&self) -> &ActorId {
        &self.donor_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Ordered log of all committed transitions.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The NGO that accepted this donation, if an `ngo` actor performed
    /// `pending → accepted`.
    pub fn associated_ngo(&self) -> Option<&ActorId> {
        self.transitions
            .iter()
            .find(|t| t.to == DonationStatus::Accepted && t.actor_role == Role::Ngo)
            .map(|t| &t.actor_id)
    }

    /// Whether `other` has the same immutable attributes as `self`.
    pub fn same_identity(&self, other: &Donation) -> bool {
        self.id == other.id
            && self.donor_id == other.donor_id
            && self.food_name == other.food_name
            && self.quantity == other.quantity
            && self.quantity_unit == other.quantity_unit
            && self.expiry_date == other.expiry_date
            && self.pickup_location == other.pickup_location
            && self.description == other.description
            && self.created_at == other.created_at
    }

    /// Apply an already-validated transition. Callers must have checked the
    /// edge and the authorization table.
    pub(crate) fn apply(
        &mut self,
        to: DonationStatus,
        actor: &Actor,
        at: Timestamp,
        reason: Option<String>,
    ) -> &TransitionRecord {
        self.transitions.push(TransitionRecord {
            from: self.status,
            to,
            actor_id: actor.id.clone(),
            actor_role: actor.role,
            timestamp: at,
            reason,
        });
        self.status = to;
        self.updated_at = at;
        &self.transitions[self.transitions.len() - 1]
    }
}
