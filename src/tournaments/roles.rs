//! Tournament and global roles.
//!
//! Roles carry a stable machine id used for storage and a display label and
//! description for the UI. Only the permission matrix gives them behavior.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Per-tournament capability tier.
///
/// Variants are declared lowest first so the derived ordering is
/// `Viewer < Collaborator < Trainer < CoAdmin < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TournamentRole {
    Viewer,
    Collaborator,
    Trainer,
    CoAdmin,
    Owner,
}

impl TournamentRole {
    /// Every role, highest first.
    pub const ALL: [Self; 5] = [
        Self::Owner,
        Self::CoAdmin,
        Self::Trainer,
        Self::Collaborator,
        Self::Viewer,
    ];

    /// Convert to string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::CoAdmin => "co-admin",
            Self::Trainer => "trainer",
            Self::Collaborator => "collaborator",
            Self::Viewer => "viewer",
        }
    }

    /// Parse from the storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "co-admin" => Some(Self::CoAdmin),
            "trainer" => Some(Self::Trainer),
            "collaborator" => Some(Self::Collaborator),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::CoAdmin => "Co-Admin",
            Self::Trainer => "Trainer",
            Self::Collaborator => "Collaborator",
            Self::Viewer => "Viewer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Owner => "Full control, including deleting the tournament and transferring ownership",
            Self::CoAdmin => "Manages the tournament, its members and invitations",
            Self::Trainer => "Manages the roster and results of assigned teams",
            Self::Collaborator => "Enters match results",
            Self::Viewer => "Read-only access",
        }
    }

    /// True for the two administrative tiers.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Owner | Self::CoAdmin)
    }
}

impl fmt::Display for TournamentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for TournamentRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

/// Account-wide capability tier, independent of any tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalRole {
    Guest,
    #[default]
    User,
    Admin,
}

impl GlobalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "guest" => Some(Self::Guest),
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl FromStr for GlobalRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRole(s.to_owned()))
    }
}
