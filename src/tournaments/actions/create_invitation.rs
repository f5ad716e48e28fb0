use chrono::Utc;

use super::actor_membership;
use crate::crypto::generate_id;
use crate::events::{AccessEvent, dispatch};
use crate::tournaments::permissions::assignable_roles;
use crate::tournaments::{
    Actor, CreateInvitation, Invitation, InvitationRepository, MembershipRepository,
    TournamentRole,
};
use crate::validators::{validate_expiry_days, validate_label, validate_team_ids};
use crate::{AccessConfig, AccessError, InviteToken};

/// Input data for creating an invitation.
#[derive(Debug, Clone)]
pub struct CreateInvitationInput {
    pub tournament_id: String,
    pub role: TournamentRole,
    /// Pre-assigned teams; dropped unless `role` is trainer.
    pub team_ids: Vec<String>,
    pub label: Option<String>,
    /// Falls back to `InvitationConfig::default_expiry_days`.
    pub expires_in_days: Option<u32>,
    /// Falls back to `InvitationConfig::default_max_uses`. 0 means unlimited.
    pub max_uses: Option<u32>,
}

impl CreateInvitationInput {
    pub fn new(tournament_id: impl Into<String>, role: TournamentRole) -> Self {
        Self {
            tournament_id: tournament_id.into(),
            role,
            team_ids: Vec::new(),
            label: None,
            expires_in_days: None,
            max_uses: None,
        }
    }
}

/// Output from creating an invitation.
#[derive(Debug)]
pub struct CreateInvitationOutput {
    pub invitation: Invitation,
    /// Shareable link carrying the token.
    pub invite_link: String,
}

/// Action to create a shareable invitation link.
///
/// This action:
/// 1. Rejects guests and the owner role
/// 2. Checks the actor may grant the requested role
/// 3. Validates label, expiry and team ids
/// 4. Generates a token and stores the invitation
pub struct CreateInvitationAction<M, I>
where
    M: MembershipRepository,
    I: InvitationRepository,
{
    membership_repo: M,
    invitation_repo: I,
    config: AccessConfig,
}

impl<M: MembershipRepository, I: InvitationRepository> CreateInvitationAction<M, I> {
    /// Creates a new `CreateInvitationAction` with default configuration.
    pub fn new(membership_repo: M, invitation_repo: I) -> Self {
        Self::with_config(membership_repo, invitation_repo, AccessConfig::default())
    }

    pub fn with_config(membership_repo: M, invitation_repo: I, config: AccessConfig) -> Self {
        Self {
            membership_repo,
            invitation_repo,
            config,
        }
    }

    /// Creates an invitation on behalf of `actor`.
    ///
    /// # Returns
    ///
    /// - `Ok(output)` - Invitation created, with its link
    /// - `Err(AccessError::Forbidden(_))` - Actor is a guest, or may not grant the role
    /// - `Err(AccessError::InvalidRole)` - The owner role was requested
    /// - `Err(AccessError::Unauthenticated)` - Actor is not a member of the tournament
    /// - `Err(AccessError::Validation(_))` - Bad label, expiry or team ids
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_invitation", skip_all, err)
    )]
    pub async fn execute(
        &self,
        input: CreateInvitationInput,
        actor: &Actor,
    ) -> Result<CreateInvitationOutput, AccessError> {
        if actor.is_guest() {
            return Err(AccessError::Forbidden("guests cannot create invitations"));
        }

        if input.role == TournamentRole::Owner {
            return Err(AccessError::InvalidRole);
        }

        let membership =
            actor_membership(&self.membership_repo, &input.tournament_id, &actor.user_id).await?;

        if !assignable_roles(membership.role).contains(&input.role) {
            return Err(AccessError::Forbidden("you cannot invite members with this role"));
        }

        let settings = &self.config.invitations;

        let label = validate_label(input.label.as_deref())?;
        let days = input.expires_in_days.unwrap_or(settings.default_expiry_days);
        validate_expiry_days(days, settings.max_expiry_days)?;

        let team_ids = if input.role == TournamentRole::Trainer {
            validate_team_ids(&input.team_ids)?;
            input.team_ids
        } else {
            Vec::new()
        };

        let now = Utc::now();
        let data = CreateInvitation {
            id: generate_id(),
            token: InviteToken::generate(settings.token_length),
            tournament_id: input.tournament_id,
            role: input.role,
            team_ids,
            label,
            created_by: actor.user_id.clone(),
            expires_at: now + settings.expiry(Some(days)),
            max_uses: input.max_uses.unwrap_or(settings.default_max_uses),
        };

        let invitation = self.invitation_repo.create(data).await?;
        let invite_link = self.config.invite_link(invitation.token.expose());

        log::info!(
            target: "tourney_access",
            "msg=\"invitation created\", tournament_id={}, invitation_id={}, role={}, max_uses={}",
            invitation.tournament_id,
            invitation.id,
            invitation.role,
            invitation.max_uses
        );

        dispatch(AccessEvent::InvitationCreated {
            tournament_id: invitation.tournament_id.clone(),
            invitation_id: invitation.id.clone(),
            role: invitation.role,
            created_by: invitation.created_by.clone(),
            at: now,
        })
        .await;

        Ok(CreateInvitationOutput {
            invitation,
            invite_link,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::tournaments::actions::testing::{seed_member, teams};
    use crate::tournaments::{GlobalRole, MockInvitationRepository, MockMembershipRepository};
    use crate::crypto::DEFAULT_TOKEN_LENGTH;
    use crate::validators::ValidationError;

    async fn setup(
        role: TournamentRole,
    ) -> CreateInvitationAction<MockMembershipRepository, MockInvitationRepository> {
        let memberships = MockMembershipRepository::new();
        seed_member(&memberships, "t1", "u1", role, vec![]).await;
        CreateInvitationAction::with_config(
            memberships,
            MockInvitationRepository::new(),
            AccessConfig::new("https://cup.example.org"),
        )
    }

    fn user(id: &str) -> Actor {
        Actor::new(id, GlobalRole::User)
    }

    #[tokio::test]
    async fn test_create_with_defaults() {
        let action = setup(TournamentRole::Owner).await;

        let output = action
            .execute(CreateInvitationInput::new("t1", TournamentRole::Viewer), &user("u1"))
            .await
            .unwrap();

        let invitation = output.invitation;
        assert_eq!(invitation.max_uses, 1);
        assert_eq!(invitation.use_count, 0);
        assert!(invitation.is_active);
        assert!(invitation.token.is_well_formed(DEFAULT_TOKEN_LENGTH));
        assert_eq!(invitation.created_by, "u1");
        assert_eq!(
            output.invite_link,
            format!("https://cup.example.org/invite?token={}", invitation.token.expose())
        );

        let expected = Utc::now() + Duration::days(7);
        assert!((invitation.expires_at - expected).num_seconds().abs() < 5);
    }

    #[tokio::test]
    async fn test_trainer_invitation_keeps_teams() {
        let action = setup(TournamentRole::Owner).await;
        let input = CreateInvitationInput {
            team_ids: teams(&["red", "blue"]),
            expires_in_days: Some(1),
            max_uses: Some(1),
            label: Some("  Coaches  ".to_owned()),
            ..CreateInvitationInput::new("t1", TournamentRole::Trainer)
        };

        let invitation = action.execute(input, &user("u1")).await.unwrap().invitation;

        assert_eq!(invitation.team_ids, teams(&["red", "blue"]));
        assert_eq!(invitation.label.as_deref(), Some("Coaches"));
    }

    #[tokio::test]
    async fn test_non_trainer_invitation_drops_teams() {
        let action = setup(TournamentRole::Owner).await;
        let input = CreateInvitationInput {
            team_ids: teams(&["red"]),
            ..CreateInvitationInput::new("t1", TournamentRole::Collaborator)
        };

        let invitation = action.execute(input, &user("u1")).await.unwrap().invitation;

        assert!(invitation.team_ids.is_empty());
    }

    #[tokio::test]
    async fn test_guest_cannot_create() {
        let action = setup(TournamentRole::Owner).await;
        let guest = Actor::new("u1", GlobalRole::Guest);

        let result = action
            .execute(CreateInvitationInput::new("t1", TournamentRole::Viewer), &guest)
            .await;

        assert!(matches!(result, Err(AccessError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_owner_role_rejected() {
        let action = setup(TournamentRole::Owner).await;

        let result = action
            .execute(CreateInvitationInput::new("t1", TournamentRole::Owner), &user("u1"))
            .await;

        assert_eq!(result.unwrap_err(), AccessError::InvalidRole);
    }

    #[tokio::test]
    async fn test_non_member_rejected() {
        let action = setup(TournamentRole::Owner).await;

        let result = action
            .execute(CreateInvitationInput::new("t1", TournamentRole::Viewer), &user("u9"))
            .await;

        assert_eq!(result.unwrap_err(), AccessError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_co_admin_cannot_invite_co_admin() {
        let action = setup(TournamentRole::CoAdmin).await;

        let denied = action
            .execute(CreateInvitationInput::new("t1", TournamentRole::CoAdmin), &user("u1"))
            .await;
        assert!(matches!(denied, Err(AccessError::Forbidden(_))));

        let allowed = action
            .execute(CreateInvitationInput::new("t1", TournamentRole::Trainer), &user("u1"))
            .await;
        assert!(allowed.is_ok());
    }

    #[tokio::test]
    async fn test_trainer_cannot_invite() {
        let action = setup(TournamentRole::Trainer).await;

        let result = action
            .execute(CreateInvitationInput::new("t1", TournamentRole::Viewer), &user("u1"))
            .await;

        assert!(matches!(result, Err(AccessError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_expiry_out_of_range() {
        let action = setup(TournamentRole::Owner).await;
        let input = CreateInvitationInput {
            expires_in_days: Some(0),
            ..CreateInvitationInput::new("t1", TournamentRole::Viewer)
        };

        let result = action.execute(input, &user("u1")).await;

        assert_eq!(
            result.unwrap_err(),
            AccessError::Validation(ValidationError::ExpiryOutOfRange { max_days: 365 })
        );
    }
}
