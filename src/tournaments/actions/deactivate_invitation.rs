use chrono::Utc;

use super::actor_membership;
use crate::AccessError;
use crate::events::{AccessEvent, dispatch};
use crate::tournaments::permissions::can_manage_invitations;
use crate::tournaments::{Deactivation, InvitationRepository, MembershipRepository};

/// Action to switch off an invitation link.
///
/// Deactivation is permanent and only possible while nobody has redeemed
/// the invitation. Repeating it is a no-op.
pub struct DeactivateInvitationAction<I, M>
where
    I: InvitationRepository,
    M: MembershipRepository,
{
    invitation_repo: I,
    membership_repo: M,
}

impl<I: InvitationRepository, M: MembershipRepository> DeactivateInvitationAction<I, M> {
    pub fn new(invitation_repo: I, membership_repo: M) -> Self {
        Self {
            invitation_repo,
            membership_repo,
        }
    }

    /// Deactivates `invitation_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` - The invitation is inactive, whether by this call or an earlier one
    /// - `Ok(false)` - Someone already redeemed it; it stays active
    /// - `Err(AccessError::NotFound)` - Invitation does not exist
    /// - `Err(AccessError::Unauthenticated)` - Actor is not a member of the tournament
    /// - `Err(AccessError::Forbidden(_))` - Actor is neither owner nor co-admin
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "deactivate_invitation", skip_all, err)
    )]
    pub async fn execute(&self, invitation_id: &str, actor_user_id: &str) -> Result<bool, AccessError> {
        let invitation = self
            .invitation_repo
            .find_by_id(invitation_id)
            .await?
            .ok_or(AccessError::NotFound)?;

        let actor =
            actor_membership(&self.membership_repo, &invitation.tournament_id, actor_user_id)
                .await?;

        if !can_manage_invitations(actor.role) {
            return Err(AccessError::Forbidden("only admins can deactivate invitations"));
        }

        match self.invitation_repo.deactivate_unredeemed(&invitation.id).await? {
            Deactivation::Deactivated => {
                log::info!(
                    target: "tourney_access",
                    "msg=\"invitation deactivated\", tournament_id={}, invitation_id={}",
                    invitation.tournament_id,
                    invitation.id
                );

                dispatch(AccessEvent::InvitationDeactivated {
                    tournament_id: invitation.tournament_id,
                    invitation_id: invitation.id,
                    actor_user_id: actor_user_id.to_owned(),
                    at: Utc::now(),
                })
                .await;

                Ok(true)
            }
            Deactivation::AlreadyInactive => Ok(true),
            Deactivation::Redeemed => {
                log::warn!(
                    target: "tourney_access",
                    "msg=\"deactivation refused, invitation already redeemed\", invitation_id={}",
                    invitation.id
                );
                Ok(false)
            }
        }
    }
}
