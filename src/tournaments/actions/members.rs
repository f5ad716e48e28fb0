use crate::AccessError;
use crate::tournaments::{MembershipRepository, TournamentMembership};

/// Lists every membership of a tournament, highest role first.
pub struct ListMembersAction<M: MembershipRepository> {
    membership_repo: M,
}

impl<M: MembershipRepository> ListMembersAction<M> {
    pub fn new(membership_repo: M) -> Self {
        Self { membership_repo }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "list_members", skip_all, err)
    )]
    pub async fn execute(&self, tournament_id: &str) -> Result<Vec<TournamentMembership>, AccessError> {
        let mut members = self.membership_repo.find_by_tournament(tournament_id).await?;
        members.sort_by(|a, b| b.role.cmp(&a.role).then(a.created_at.cmp(&b.created_at)));
        Ok(members)
    }
}

/// Looks up one user's membership in a tournament.
pub struct GetMembershipAction<M: MembershipRepository> {
    membership_repo: M,
}

impl<M: MembershipRepository> GetMembershipAction<M> {
    pub fn new(membership_repo: M) -> Self {
        Self { membership_repo }
    }

    /// Returns `Ok(None)` if the user is not a member.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "get_membership", skip_all, err)
    )]
    pub async fn execute(
        &self,
        tournament_id: &str,
        user_id: &str,
    ) -> Result<Option<TournamentMembership>, AccessError> {
        self.membership_repo
            .find_by_tournament_and_user(tournament_id, user_id)
            .await
    }
}

/// Every tournament membership a user holds, for their dashboard.
pub struct ListUserTournamentsAction<M: MembershipRepository> {
    membership_repo: M,
}

impl<M: MembershipRepository> ListUserTournamentsAction<M> {
    pub fn new(membership_repo: M) -> Self {
        Self { membership_repo }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "list_user_tournaments", skip_all, err)
    )]
    pub async fn execute(&self, user_id: &str) -> Result<Vec<TournamentMembership>, AccessError> {
        self.membership_repo.find_by_user(user_id).await
    }
}
