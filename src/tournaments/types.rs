//! Core types for tournament access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::roles::{GlobalRole, TournamentRole};
use crate::token::InviteToken;
use crate::validators::{ValidationError, normalize_email};

/// An account as known to the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Lowercase; `None` for guests.
    pub email: Option<String>,
    pub display_name: String,
    pub global_role: GlobalRole,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A registered account. The email is normalized to lowercase.
    pub fn registered(
        id: impl Into<String>,
        email: &str,
        display_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            email: Some(normalize_email(email)?),
            display_name: display_name.into(),
            global_role: GlobalRole::User,
            is_anonymous: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// An anonymous guest identity without email.
    pub fn guest(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email: None,
            display_name: display_name.into(),
            global_role: GlobalRole::Guest,
            is_anonymous: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The calling identity, as supplied by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub global_role: GlobalRole,
    pub is_anonymous: bool,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, global_role: GlobalRole) -> Self {
        Self {
            user_id: user_id.into(),
            global_role,
            is_anonymous: false,
        }
    }

    /// Guests and anonymous identities.
    pub fn is_guest(&self) -> bool {
        self.global_role == GlobalRole::Guest || self.is_anonymous
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            global_role: user.global_role,
            is_anonymous: user.is_anonymous,
        }
    }
}

/// Links a user to a tournament with a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentMembership {
    pub id: String,
    pub user_id: String,
    pub tournament_id: String,
    pub role: TournamentRole,
    /// Assigned teams; always empty unless `role` is trainer.
    pub team_ids: Vec<String>,
    pub invited_by: Option<String>,
    pub invited_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TournamentMembership {
    pub fn is_owner(&self) -> bool {
        self.role == TournamentRole::Owner
    }
}

/// A redeemable invitation to join a tournament with a preset role.
///
/// State is never stored as an enum; it is derived from `is_active`,
/// `expires_at` and the usage counters by [`Invitation::status`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: String,
    pub token: InviteToken,
    pub tournament_id: String,
    /// Never owner.
    pub role: TournamentRole,
    /// Pre-assigned teams for trainer invitations.
    pub team_ids: Vec<String>,
    pub label: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// 0 means unlimited.
    pub max_uses: u32,
    pub use_count: u32,
    pub used_by: Vec<String>,
    pub is_active: bool,
}

impl Invitation {
    /// Derives the lifecycle state at `now`.
    ///
    /// Precedence: deactivated, expired, exhausted, pending.
    pub fn status(&self, now: DateTime<Utc>) -> InvitationStatus {
        if !self.is_active {
            InvitationStatus::Deactivated
        } else if self.expires_at < now {
            InvitationStatus::Expired
        } else if self.max_uses > 0 && self.use_count >= self.max_uses {
            InvitationStatus::Exhausted
        } else {
            InvitationStatus::Pending
        }
    }

    pub fn is_pending(&self, now: DateTime<Utc>) -> bool {
        self.status(now) == InvitationStatus::Pending
    }

    /// Uses left, `None` when unlimited.
    pub fn remaining_uses(&self) -> Option<u32> {
        (self.max_uses > 0).then(|| self.max_uses.saturating_sub(self.use_count))
    }

    pub fn has_been_redeemed(&self) -> bool {
        !self.used_by.is_empty()
    }
}

/// Lifecycle state of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Active, unexpired and under quota. Partly used invitations stay here.
    Pending,
    Expired,
    Deactivated,
    /// `use_count` reached a non-zero `max_uses`.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviterSummary {
    pub user_id: String,
    pub display_name: String,
}

/// What a prospective member sees before accepting an invitation.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationPreview {
    pub invitation: Invitation,
    /// `None` if the tournament record is gone.
    pub tournament: Option<TournamentSummary>,
    pub inviter: Option<InviterSummary>,
}
