use chrono::Utc;

use super::actor_membership;
use crate::AccessError;
use crate::events::{AccessEvent, dispatch};
use crate::tournaments::MembershipRepository;
use crate::tournaments::permissions::can_change_role;

/// Action to remove a member from a tournament.
///
/// The owner can never be removed; ownership has to be transferred first.
pub struct RemoveMemberAction<M: MembershipRepository> {
    membership_repo: M,
}

impl<M: MembershipRepository> RemoveMemberAction<M> {
    pub fn new(membership_repo: M) -> Self {
        Self { membership_repo }
    }

    /// Deletes the membership.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Membership deleted
    /// - `Err(AccessError::NotFound)` - Target membership does not exist
    /// - `Err(AccessError::Unauthenticated)` - Actor is not a member of the tournament
    /// - `Err(AccessError::Forbidden(_))` - Target is the owner, or outranks the actor
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "remove_member", skip_all, err)
    )]
    pub async fn execute(&self, membership_id: &str, actor_user_id: &str) -> Result<(), AccessError> {
        let target = self
            .membership_repo
            .find_by_id(membership_id)
            .await?
            .ok_or(AccessError::NotFound)?;

        let actor =
            actor_membership(&self.membership_repo, &target.tournament_id, actor_user_id).await?;

        if target.is_owner() {
            return Err(AccessError::Forbidden(
                "the owner cannot be removed, transfer ownership first",
            ));
        }

        if !can_change_role(actor.role, target.role) {
            return Err(AccessError::Forbidden("you cannot remove this member"));
        }

        self.membership_repo.delete(&target.id).await?;

        log::info!(
            target: "tourney_access",
            "msg=\"member removed\", tournament_id={}, user_id={}, role={}",
            target.tournament_id,
            target.user_id,
            target.role
        );

        dispatch(AccessEvent::MemberRemoved {
            tournament_id: target.tournament_id,
            user_id: target.user_id,
            actor_user_id: actor_user_id.to_owned(),
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournaments::actions::testing::seed_member;
    use crate::tournaments::{MockMembershipRepository, TournamentRole};

    #[tokio::test]
    async fn test_owner_removes_trainer() {
        let repo = MockMembershipRepository::new();
        seed_member(&repo, "t1", "owner", TournamentRole::Owner, vec![]).await;
        let trainer = seed_member(&repo, "t1", "coach", TournamentRole::Trainer, vec![]).await;

        RemoveMemberAction::new(repo.clone())
            .execute(&trainer.id, "owner")
            .await
            .unwrap();

        assert!(repo.find_by_id(&trainer.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_owner_cannot_be_removed() {
        let repo = MockMembershipRepository::new();
        let owner = seed_member(&repo, "t1", "owner", TournamentRole::Owner, vec![]).await;
        seed_member(&repo, "t1", "admin", TournamentRole::CoAdmin, vec![]).await;
        let action = RemoveMemberAction::new(repo.clone());

        for actor in ["owner", "admin"] {
            let result = action.execute(&owner.id, actor).await;
            assert!(matches!(result, Err(AccessError::Forbidden(_))));
        }
        assert_eq!(repo.owner_count("t1"), 1);
    }

    #[tokio::test]
    async fn test_co_admin_cannot_remove_co_admin() {
        let repo = MockMembershipRepository::new();
        seed_member(&repo, "t1", "a", TournamentRole::CoAdmin, vec![]).await;
        let other = seed_member(&repo, "t1", "b", TournamentRole::CoAdmin, vec![]).await;

        let result = RemoveMemberAction::new(repo).execute(&other.id, "a").await;

        assert!(matches!(result, Err(AccessError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_viewer_cannot_remove_anyone() {
        let repo = MockMembershipRepository::new();
        seed_member(&repo, "t1", "v1", TournamentRole::Viewer, vec![]).await;
        let other = seed_member(&repo, "t1", "v2", TournamentRole::Viewer, vec![]).await;

        let result = RemoveMemberAction::new(repo).execute(&other.id, "v1").await;

        assert!(matches!(result, Err(AccessError::Forbidden(_))));
    }
}
