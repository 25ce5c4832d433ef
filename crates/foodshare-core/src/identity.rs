//! # Identity Newtypes
//!
//! Newtype wrappers for the two identifier namespaces the lifecycle core
//! deals with. These prevent accidental identifier confusion: a donation
//! id cannot be compared against an actor id.
//!
//! `DonationId` is minted by the core at creation time. `ActorId` is
//! supplied by the external identity provider and is treated as an opaque,
//! trusted string.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FoodshareError;

/// Unique identifier for a donation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DonationId(pub Uuid);

impl DonationId {
    /// Generate a new random donation identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DonationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DonationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "donation:{}", self.0)
    }
}

impl FromStr for DonationId {
    type Err = FoodshareError;

    /// Accepts both the bare UUID and the `donation:`-prefixed display form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("donation:").unwrap_or(s);
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|e| FoodshareError::Parse(format!("invalid donation id {s:?}: {e}")))
    }
}

/// Identity of an actor as supplied by the identity provider.
///
/// The core never authenticates this value. The only invariant is that it
/// is non-empty after trimming, since an empty id would compare equal for
/// every anonymous caller and break the donor-ownership rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActorId(String);

impl ActorId {
    /// Create an actor id, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self, FoodshareError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(FoodshareError::Validation(
                "actor id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActorId {
    type Error = FoodshareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActorId> for String {
    fn from(id: ActorId) -> Self {
        id.0
    }
}

impl FromStr for ActorId {
    type Err = FoodshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_ids_are_unique() {
        assert_ne!(DonationId::new(), DonationId::new());
    }

    #[test]
    fn test_donation_id_display_has_prefix() {
        let id = DonationId::new();
        assert_eq!(id.to_string(), format!("donation:{}", id.as_uuid()));
    }

    #[test]
    fn test_donation_id_parses_display_and_bare_forms() {
        let id = DonationId::new();
        assert_eq!(id.to_string().parse::<DonationId>().unwrap(), id);
        assert_eq!(id.as_uuid().to_string().parse::<DonationId>().unwrap(), id);
    }

    #[test]
    fn test_donation_id_rejects_garbage() {
        assert!("donation:not-a-uuid".parse::<DonationId>().is_err());
    }

    #[test]
    fn test_actor_id_rejects_blank() {
        assert!(ActorId::new("").is_err());
        assert!(ActorId::new("   ").is_err());
        assert_eq!(ActorId::new("u1").unwrap().as_str(), "u1");
    }

    #[test]
    fn test_actor_id_serde_is_transparent_and_validated() {
        let id = ActorId::new("u1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"u1\"");
        let parsed: ActorId = serde_json::from_str("\"u1\"").unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<ActorId>("\"\"").is_err());
    }
}
