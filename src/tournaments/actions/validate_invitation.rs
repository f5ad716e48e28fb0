use chrono::Utc;

use crate::tournaments::{
    Invitation, InvitationPreview, InvitationRepository, InvitationStatus, InviterSummary,
    TournamentRepository, UserRepository,
};
use crate::{AccessError, InviteToken};

/// Maps a non-pending state to the error a redeemer sees.
pub(super) fn ensure_pending(invitation: &Invitation) -> Result<(), AccessError> {
    match invitation.status(Utc::now()) {
        InvitationStatus::Pending => Ok(()),
        InvitationStatus::Deactivated => Err(AccessError::Deactivated),
        InvitationStatus::Expired => Err(AccessError::Expired),
        InvitationStatus::Exhausted => Err(AccessError::MaxUsesReached),
    }
}

/// Action to check an invitation token before the user commits to it.
///
/// Returns the invitation with the tournament and inviter display data the
/// UI shows on the landing page. Nothing is written.
pub struct ValidateInvitationAction<I, T, U>
where
    I: InvitationRepository,
    T: TournamentRepository,
    U: UserRepository,
{
    invitation_repo: I,
    tournament_repo: T,
    user_repo: U,
}

impl<I, T, U> ValidateInvitationAction<I, T, U>
where
    I: InvitationRepository,
    T: TournamentRepository,
    U: UserRepository,
{
    pub fn new(invitation_repo: I, tournament_repo: T, user_repo: U) -> Self {
        Self {
            invitation_repo,
            tournament_repo,
            user_repo,
        }
    }

    /// Validates `token`.
    ///
    /// # Returns
    ///
    /// - `Ok(preview)` - The invitation is pending
    /// - `Err(AccessError::NotFound)` - No invitation carries this token
    /// - `Err(AccessError::Deactivated)` - Invitation was deactivated
    /// - `Err(AccessError::Expired)` - Invitation has expired
    /// - `Err(AccessError::MaxUsesReached)` - Every use has been taken
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "validate_invitation", skip_all, err)
    )]
    pub async fn execute(&self, token: &InviteToken) -> Result<InvitationPreview, AccessError> {
        let invitation = self
            .invitation_repo
            .find_by_token(token)
            .await?
            .ok_or(AccessError::NotFound)?;

        ensure_pending(&invitation)?;

        let tournament = self
            .tournament_repo
            .find_by_id(&invitation.tournament_id)
            .await?;

        let inviter = self
            .user_repo
            .find_user_by_id(&invitation.created_by)
            .await?
            .map(|user| InviterSummary {
                user_id: user.id,
                display_name: user.display_name,
            });

        Ok(InvitationPreview {
            invitation,
            tournament,
            inviter,
        })
    }
}
