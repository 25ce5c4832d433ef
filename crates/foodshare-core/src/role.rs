//! # Actor Roles
//!
//! The five roles an identity provider may assign to a caller. Roles are
//! deliberately flat: there is no `Ord` and no privilege ladder. Every
//! permission decision is an explicit allow-list lookup in the
//! authorization table of `foodshare-state`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FoodshareError;
use crate::identity::ActorId;

/// Role of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Receiving organisation.
    Ngo,
    /// Courier who collects and delivers food.
    Volunteer,
    /// Creator of donations.
    Donor,
    /// Registered account with no operational role.
    User,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Ngo,
        Role::Volunteer,
        Role::Donor,
        Role::User,
    ];

    /// Return the string representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Ngo => "ngo",
            Self::Volunteer => "volunteer",
            Self::Donor => "donor",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = FoodshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| FoodshareError::Parse(format!("unknown role {s:?}")))
    }
}

/// A caller as seen by the core: a trusted `(id, role)` pair from the
/// identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: ActorId, role: Role) -> Self {
        Self { id, role }
    }

    /// Whether this actor is the given identity.
    pub fn is(&self, id: &ActorId) -> bool {
        &self.id == id
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.role, self.id)
    }
}
