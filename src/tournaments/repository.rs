//! Storage collaborator interfaces.
//!
//! Implementations own every record; actions only hold transient copies.
//! All ids are opaque strings generated by [`crate::crypto::generate_id`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::roles::TournamentRole;
use super::types::{Invitation, TournamentMembership, TournamentSummary, User};
use crate::AccessError;
use crate::token::InviteToken;

#[derive(Debug, Clone)]
pub struct CreateMembership {
    pub id: String,
    pub tournament_id: String,
    pub user_id: String,
    pub role: TournamentRole,
    pub team_ids: Vec<String>,
    pub invited_by: Option<String>,
    pub invited_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct CreateInvitation {
    pub id: String,
    pub token: InviteToken,
    pub tournament_id: String,
    pub role: TournamentRole,
    pub team_ids: Vec<String>,
    pub label: Option<String>,
    pub created_by: String,
    pub expires_at: DateTime<Utc>,
    pub max_uses: u32,
}

/// Outcome of the atomic increment-with-ceiling on an invitation.
#[derive(Debug, Clone, PartialEq)]
pub enum Redemption {
    /// Counter bumped and redeemer appended; carries the updated record.
    Recorded(Invitation),
    /// `use_count` already reached the ceiling; nothing changed.
    LimitReached,
    /// The invitation was deactivated; nothing changed.
    Inactive,
}

/// Outcome of a guarded deactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deactivation {
    Deactivated,
    AlreadyInactive,
    /// Someone already redeemed it; left active.
    Redeemed,
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Must fail with `AccessError::AlreadyMember` if the user already has a
    /// membership in the tournament.
    async fn create(&self, data: CreateMembership) -> Result<TournamentMembership, AccessError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TournamentMembership>, AccessError>;
    async fn find_by_tournament_and_user(
        &self,
        tournament_id: &str,
        user_id: &str,
    ) -> Result<Option<TournamentMembership>, AccessError>;
    async fn find_by_tournament(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<TournamentMembership>, AccessError>;
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<TournamentMembership>, AccessError>;
    /// Overwrites role and team ids in a single write.
    async fn update_role(
        &self,
        id: &str,
        role: TournamentRole,
        team_ids: &[String],
    ) -> Result<TournamentMembership, AccessError>;
    async fn update_team_ids(
        &self,
        id: &str,
        team_ids: &[String],
    ) -> Result<TournamentMembership, AccessError>;
    async fn delete(&self, id: &str) -> Result<(), AccessError>;
}

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn create(&self, data: CreateInvitation) -> Result<Invitation, AccessError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Invitation>, AccessError>;
    async fn find_by_token(&self, token: &InviteToken) -> Result<Option<Invitation>, AccessError>;
    async fn find_by_tournament(&self, tournament_id: &str) -> Result<Vec<Invitation>, AccessError>;

    /// Atomically increments `use_count` and appends `user_id` to `used_by`,
    /// but only while the invitation is active and `use_count < ceiling`
    /// (`ceiling == 0` means no limit). Implementations must not read and
    /// write in separate steps without compare-and-swap.
    async fn record_redemption(
        &self,
        id: &str,
        user_id: &str,
        ceiling: u32,
    ) -> Result<Redemption, AccessError>;

    /// Undoes one `record_redemption` for `user_id`.
    async fn release_redemption(&self, id: &str, user_id: &str) -> Result<(), AccessError>;

    /// Sets `is_active = false` only if `used_by` is empty.
    async fn deactivate_unredeemed(&self, id: &str) -> Result<Deactivation, AccessError>;
}

/// Read access to tournament display data.
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<TournamentSummary>, AccessError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AccessError>;
}
