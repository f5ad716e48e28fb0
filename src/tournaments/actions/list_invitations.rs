use chrono::Utc;

use crate::AccessError;
use crate::tournaments::{Invitation, InvitationRepository};

/// Lists the invitations of a tournament that can still be redeemed.
pub struct ListActiveInvitationsAction<I: InvitationRepository> {
    invitation_repo: I,
}

impl<I: InvitationRepository> ListActiveInvitationsAction<I> {
    pub fn new(invitation_repo: I) -> Self {
        Self { invitation_repo }
    }

    /// Pending invitations only, newest first.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "list_active_invitations", skip_all, err)
    )]
    pub async fn execute(&self, tournament_id: &str) -> Result<Vec<Invitation>, AccessError> {
        let now = Utc::now();
        let mut invitations: Vec<_> = self
            .invitation_repo
            .find_by_tournament(tournament_id)
            .await?
            .into_iter()
            .filter(|i| i.is_pending(now))
            .collect();
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invitations)
    }
}
