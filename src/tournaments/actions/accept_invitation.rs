use chrono::Utc;

use super::validate_invitation::ensure_pending;
use crate::crypto::generate_id;
use crate::events::{AccessEvent, dispatch};
use crate::tournaments::{
    Actor, CreateMembership, InvitationRepository, MembershipRepository, Redemption,
    TournamentMembership,
};
use crate::{AccessConfig, AccessError, GuestRedemptionPolicy, InviteToken};

/// Action to redeem an invitation token.
///
/// This action:
/// 1. Re-validates the invitation
/// 2. Rejects users who are already members
/// 3. Claims a use through the repository's atomic increment-with-ceiling
/// 4. Creates the membership, releasing the claimed use if that fails
///
/// Claiming before creating means two concurrent redeemers of a single-use
/// invitation can never both end up as members.
pub struct AcceptInvitationAction<I, M>
where
    I: InvitationRepository,
    M: MembershipRepository,
{
    invitation_repo: I,
    membership_repo: M,
    config: AccessConfig,
}

impl<I: InvitationRepository, M: MembershipRepository> AcceptInvitationAction<I, M> {
    pub fn new(invitation_repo: I, membership_repo: M) -> Self {
        Self::with_config(invitation_repo, membership_repo, AccessConfig::default())
    }

    pub fn with_config(invitation_repo: I, membership_repo: M, config: AccessConfig) -> Self {
        Self {
            invitation_repo,
            membership_repo,
            config,
        }
    }

    /// Accepts the invitation behind `token` for `redeemer`.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - The new membership, with the invitation's role and teams
    /// - `Err(AccessError::Unauthenticated)` - Guest redeemer under `RequireAccount`
    /// - `Err(AccessError::NotFound)` - No invitation carries this token
    /// - `Err(AccessError::Deactivated | Expired | MaxUsesReached)` - Invitation not pending
    /// - `Err(AccessError::AlreadyMember)` - Redeemer already belongs to the tournament
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "accept_invitation", skip_all, err)
    )]
    pub async fn execute(
        &self,
        token: &InviteToken,
        redeemer: &Actor,
    ) -> Result<TournamentMembership, AccessError> {
        if self.config.guest_redemption == GuestRedemptionPolicy::RequireAccount
            && redeemer.is_guest()
        {
            return Err(AccessError::Unauthenticated);
        }

        let invitation = self
            .invitation_repo
            .find_by_token(token)
            .await?
            .ok_or(AccessError::NotFound)?;

        ensure_pending(&invitation)?;

        if self
            .membership_repo
            .find_by_tournament_and_user(&invitation.tournament_id, &redeemer.user_id)
            .await?
            .is_some()
        {
            return Err(AccessError::AlreadyMember);
        }

        match self
            .invitation_repo
            .record_redemption(&invitation.id, &redeemer.user_id, invitation.max_uses)
            .await?
        {
            Redemption::Recorded(_) => {}
            Redemption::LimitReached => return Err(AccessError::MaxUsesReached),
            Redemption::Inactive => return Err(AccessError::Deactivated),
        }

        let now = Utc::now();
        let created = self
            .membership_repo
            .create(CreateMembership {
                id: generate_id(),
                tournament_id: invitation.tournament_id.clone(),
                user_id: redeemer.user_id.clone(),
                role: invitation.role,
                team_ids: invitation.team_ids.clone(),
                invited_by: Some(invitation.created_by.clone()),
                invited_at: Some(invitation.created_at),
                accepted_at: Some(now),
            })
            .await;

        let membership = match created {
            Ok(membership) => membership,
            Err(err) => {
                if let Err(release_err) = self
                    .invitation_repo
                    .release_redemption(&invitation.id, &redeemer.user_id)
                    .await
                {
                    log::error!(
                        target: "tourney_access",
                        "msg=\"failed to release redemption\", invitation_id={}, user_id={}, error=\"{:?}\"",
                        invitation.id,
                        redeemer.user_id,
                        release_err
                    );
                }
                return Err(err);
            }
        };

        log::info!(
            target: "tourney_access",
            "msg=\"invitation accepted\", tournament_id={}, invitation_id={}, user_id={}, role={}",
            invitation.tournament_id,
            invitation.id,
            redeemer.user_id,
            invitation.role
        );

        dispatch(AccessEvent::InvitationAccepted {
            tournament_id: invitation.tournament_id,
            invitation_id: invitation.id,
            user_id: redeemer.user_id.clone(),
            at: now,
        })
        .await;

        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::tournaments::actions::testing::{FlakyMembershipRepository, seed_member, teams};
    use crate::tournaments::{
        GlobalRole, Invitation, MockInvitationRepository, MockMembershipRepository,
        TournamentRole,
    };

    fn invitation(max_uses: u32) -> Invitation {
        let now = Utc::now();
        Invitation {
            id: "i1".to_owned(),
            token: InviteToken::new("tok"),
            tournament_id: "t1".to_owned(),
            role: TournamentRole::Trainer,
            team_ids: teams(&["red"]),
            label: None,
            created_by: "owner".to_owned(),
            created_at: now,
            expires_at: now + Duration::days(1),
            max_uses,
            use_count: 0,
            used_by: vec![],
            is_active: true,
        }
    }

    fn user(id: &str) -> Actor {
        Actor::new(id, GlobalRole::User)
    }

    fn setup(
        max_uses: u32,
    ) -> (
        MockInvitationRepository,
        MockMembershipRepository,
        AcceptInvitationAction<MockInvitationRepository, MockMembershipRepository>,
    ) {
        let invitations = MockInvitationRepository::new();
        invitations.insert(invitation(max_uses));
        let memberships = MockMembershipRepository::new();
        let action = AcceptInvitationAction::new(invitations.clone(), memberships.clone());
        (invitations, memberships, action)
    }

    #[tokio::test]
    async fn test_accept_copies_invitation_terms() {
        let (invitations, _, action) = setup(1);

        let membership = action.execute(&InviteToken::new("tok"), &user("u2")).await.unwrap();

        assert_eq!(membership.role, TournamentRole::Trainer);
        assert_eq!(membership.team_ids, teams(&["red"]));
        assert_eq!(membership.invited_by.as_deref(), Some("owner"));
        assert!(membership.invited_at.is_some());
        assert!(membership.accepted_at.is_some());

        let stored = invitations.find_by_id("i1").await.unwrap().unwrap();
        assert_eq!(stored.use_count, 1);
        assert_eq!(stored.used_by, vec!["u2".to_owned()]);
    }

    #[tokio::test]
    async fn test_single_use_invitation_is_exhausted() {
        let (_, _, action) = setup(1);
        let token = InviteToken::new("tok");

        action.execute(&token, &user("u2")).await.unwrap();
        let second = action.execute(&token, &user("u3")).await;

        assert_eq!(second.unwrap_err(), AccessError::MaxUsesReached);
    }

    #[tokio::test]
    async fn test_existing_member_keeps_counter() {
        let (invitations, memberships, action) = setup(5);
        seed_member(&memberships, "t1", "u2", TournamentRole::Viewer, vec![]).await;

        let result = action.execute(&InviteToken::new("tok"), &user("u2")).await;

        assert_eq!(result.unwrap_err(), AccessError::AlreadyMember);
        let stored = invitations.find_by_id("i1").await.unwrap().unwrap();
        assert_eq!(stored.use_count, 0);
    }

    #[tokio::test]
    async fn test_unknown_and_deactivated_tokens() {
        let (invitations, _, action) = setup(1);

        assert_eq!(
            action
                .execute(&InviteToken::new("other"), &user("u2"))
                .await
                .unwrap_err(),
            AccessError::NotFound
        );

        invitations.deactivate_unredeemed("i1").await.unwrap();
        assert_eq!(
            action
                .execute(&InviteToken::new("tok"), &user("u2"))
                .await
                .unwrap_err(),
            AccessError::Deactivated
        );
    }

    #[tokio::test]
    async fn test_guest_redeems_under_default_policy() {
        let (_, _, action) = setup(1);
        let guest = Actor::new("g1", GlobalRole::Guest);

        let membership = action.execute(&InviteToken::new("tok"), &guest).await.unwrap();

        assert_eq!(membership.user_id, "g1");
    }

    #[tokio::test]
    async fn test_guest_refused_when_account_required() {
        let invitations = MockInvitationRepository::new();
        invitations.insert(invitation(1));
        let config = AccessConfig {
            guest_redemption: GuestRedemptionPolicy::RequireAccount,
            ..AccessConfig::default()
        };
        let action = AcceptInvitationAction::with_config(
            invitations.clone(),
            MockMembershipRepository::new(),
            config,
        );
        let anonymous = Actor {
            is_anonymous: true,
            ..user("anon")
        };

        let result = action.execute(&InviteToken::new("tok"), &anonymous).await;

        assert_eq!(result.unwrap_err(), AccessError::Unauthenticated);
        let stored = invitations.find_by_id("i1").await.unwrap().unwrap();
        assert_eq!(stored.use_count, 0);

        assert!(action.execute(&InviteToken::new("tok"), &user("u2")).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_membership_write_releases_use() {
        let invitations = MockInvitationRepository::new();
        invitations.insert(invitation(1));
        let memberships = FlakyMembershipRepository::new(MockMembershipRepository::new())
            .failing_create();
        let action = AcceptInvitationAction::new(invitations.clone(), memberships);

        let result = action.execute(&InviteToken::new("tok"), &user("u2")).await;

        assert!(matches!(result, Err(AccessError::Storage(_))));
        let stored = invitations.find_by_id("i1").await.unwrap().unwrap();
        assert_eq!(stored.use_count, 0);
        assert!(stored.used_by.is_empty());
        assert!(stored.is_pending(Utc::now()));
    }
}
