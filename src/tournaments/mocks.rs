#![allow(clippy::significant_drop_tightening)]

//! In-memory repositories for tests and prototypes.
//!
//! Each mock is cheap to clone; clones share the same underlying maps.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::repository::{
    CreateInvitation, CreateMembership, Deactivation, InvitationRepository, MembershipRepository,
    Redemption, TournamentRepository, UserRepository,
};
use super::roles::TournamentRole;
use super::types::{Invitation, TournamentMembership, TournamentSummary, User};
use crate::AccessError;
use crate::token::InviteToken;

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, AccessError> {
    lock.read()
        .map_err(|_| AccessError::Storage("lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, AccessError> {
    lock.write()
        .map_err(|_| AccessError::Storage("lock poisoned".into()))
}

#[derive(Clone, Default)]
pub struct MockMembershipRepository {
    memberships: Arc<RwLock<HashMap<String, TournamentMembership>>>,
}

impl MockMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of owner memberships in a tournament.
    pub fn owner_count(&self, tournament_id: &str) -> usize {
        self.memberships.read().map_or(0, |m| {
            m.values()
                .filter(|m| m.tournament_id == tournament_id && m.is_owner())
                .count()
        })
    }
}

#[async_trait]
impl MembershipRepository for MockMembershipRepository {
    async fn create(&self, data: CreateMembership) -> Result<TournamentMembership, AccessError> {
        let mut memberships = write(&self.memberships)?;

        if memberships
            .values()
            .any(|m| m.tournament_id == data.tournament_id && m.user_id == data.user_id)
        {
            return Err(AccessError::AlreadyMember);
        }

        let now = Utc::now();
        let membership = TournamentMembership {
            id: data.id,
            user_id: data.user_id,
            tournament_id: data.tournament_id,
            role: data.role,
            team_ids: data.team_ids,
            invited_by: data.invited_by,
            invited_at: data.invited_at,
            accepted_at: data.accepted_at,
            created_at: now,
            updated_at: now,
        };
        memberships.insert(membership.id.clone(), membership.clone());

        Ok(membership)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TournamentMembership>, AccessError> {
        Ok(read(&self.memberships)?.get(id).cloned())
    }

    async fn find_by_tournament_and_user(
        &self,
        tournament_id: &str,
        user_id: &str,
    ) -> Result<Option<TournamentMembership>, AccessError> {
        Ok(read(&self.memberships)?
            .values()
            .find(|m| m.tournament_id == tournament_id && m.user_id == user_id)
            .cloned())
    }

    async fn find_by_tournament(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<TournamentMembership>, AccessError> {
        let mut found: Vec<_> = read(&self.memberships)?
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.role.cmp(&a.role).then(a.created_at.cmp(&b.created_at)));
        Ok(found)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<TournamentMembership>, AccessError> {
        Ok(read(&self.memberships)?
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_role(
        &self,
        id: &str,
        role: TournamentRole,
        team_ids: &[String],
    ) -> Result<TournamentMembership, AccessError> {
        let mut memberships = write(&self.memberships)?;

        let membership = memberships.get_mut(id).ok_or(AccessError::NotFound)?;
        membership.role = role;
        team_ids.clone_into(&mut membership.team_ids);
        membership.updated_at = Utc::now();

        Ok(membership.clone())
    }

    async fn update_team_ids(
        &self,
        id: &str,
        team_ids: &[String],
    ) -> Result<TournamentMembership, AccessError> {
        let mut memberships = write(&self.memberships)?;

        let membership = memberships.get_mut(id).ok_or(AccessError::NotFound)?;
        team_ids.clone_into(&mut membership.team_ids);
        membership.updated_at = Utc::now();

        Ok(membership.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AccessError> {
        write(&self.memberships)?.remove(id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockInvitationRepository {
    invitations: Arc<RwLock<HashMap<String, Invitation>>>,
}

impl MockInvitationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a prebuilt record as-is, e.g. one that is already expired.
    pub fn insert(&self, invitation: Invitation) {
        if let Ok(mut invitations) = self.invitations.write() {
            invitations.insert(invitation.id.clone(), invitation);
        }
    }
}

#[async_trait]
impl InvitationRepository for MockInvitationRepository {
    async fn create(&self, data: CreateInvitation) -> Result<Invitation, AccessError> {
        let invitation = Invitation {
            id: data.id,
            token: data.token,
            tournament_id: data.tournament_id,
            role: data.role,
            team_ids: data.team_ids,
            label: data.label,
            created_by: data.created_by,
            created_at: Utc::now(),
            expires_at: data.expires_at,
            max_uses: data.max_uses,
            use_count: 0,
            used_by: Vec::new(),
            is_active: true,
        };

        write(&self.invitations)?.insert(invitation.id.clone(), invitation.clone());

        Ok(invitation)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Invitation>, AccessError> {
        Ok(read(&self.invitations)?.get(id).cloned())
    }

    async fn find_by_token(&self, token: &InviteToken) -> Result<Option<Invitation>, AccessError> {
        Ok(read(&self.invitations)?
            .values()
            .find(|i| i.token == *token)
            .cloned())
    }

    async fn find_by_tournament(&self, tournament_id: &str) -> Result<Vec<Invitation>, AccessError> {
        let mut found: Vec<_> = read(&self.invitations)?
            .values()
            .filter(|i| i.tournament_id == tournament_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn record_redemption(
        &self,
        id: &str,
        user_id: &str,
        ceiling: u32,
    ) -> Result<Redemption, AccessError> {
        let mut invitations = write(&self.invitations)?;

        let invitation = invitations.get_mut(id).ok_or(AccessError::NotFound)?;
        if !invitation.is_active {
            return Ok(Redemption::Inactive);
        }
        if ceiling > 0 && invitation.use_count >= ceiling {
            return Ok(Redemption::LimitReached);
        }

        invitation.use_count += 1;
        invitation.used_by.push(user_id.to_owned());

        Ok(Redemption::Recorded(invitation.clone()))
    }

    async fn release_redemption(&self, id: &str, user_id: &str) -> Result<(), AccessError> {
        let mut invitations = write(&self.invitations)?;

        let invitation = invitations.get_mut(id).ok_or(AccessError::NotFound)?;
        if let Some(pos) = invitation.used_by.iter().rposition(|u| u == user_id) {
            invitation.used_by.remove(pos);
            invitation.use_count = invitation.use_count.saturating_sub(1);
        }

        Ok(())
    }

    async fn deactivate_unredeemed(&self, id: &str) -> Result<Deactivation, AccessError> {
        let mut invitations = write(&self.invitations)?;

        let invitation = invitations.get_mut(id).ok_or(AccessError::NotFound)?;
        if !invitation.is_active {
            return Ok(Deactivation::AlreadyInactive);
        }
        if invitation.has_been_redeemed() {
            return Ok(Deactivation::Redeemed);
        }

        invitation.is_active = false;
        Ok(Deactivation::Deactivated)
    }
}

#[derive(Clone, Default)]
pub struct MockTournamentRepository {
    tournaments: Arc<RwLock<HashMap<String, TournamentSummary>>>,
}

impl MockTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: impl Into<String>, name: impl Into<String>) {
        let summary = TournamentSummary {
            id: id.into(),
            name: name.into(),
        };
        if let Ok(mut tournaments) = self.tournaments.write() {
            tournaments.insert(summary.id.clone(), summary);
        }
    }
}

#[async_trait]
impl TournamentRepository for MockTournamentRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<TournamentSummary>, AccessError> {
        Ok(read(&self.tournaments)?.get(id).cloned())
    }
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id.clone(), user);
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AccessError> {
        Ok(read(&self.users)?.get(id).cloned())
    }
}
