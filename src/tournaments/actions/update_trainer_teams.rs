use chrono::Utc;

use super::actor_membership;
use crate::AccessError;
use crate::events::{AccessEvent, dispatch};
use crate::tournaments::permissions::can_manage_members;
use crate::tournaments::{MembershipRepository, TournamentMembership, TournamentRole};
use crate::validators::validate_team_ids;

/// Action to replace the teams assigned to a trainer.
pub struct UpdateTrainerTeamsAction<M: MembershipRepository> {
    membership_repo: M,
}

impl<M: MembershipRepository> UpdateTrainerTeamsAction<M> {
    pub fn new(membership_repo: M) -> Self {
        Self { membership_repo }
    }

    /// Overwrites the trainer's team ids.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - The updated membership
    /// - `Err(AccessError::NotFound)` - Target membership does not exist
    /// - `Err(AccessError::Unauthenticated)` - Actor is not a member of the tournament
    /// - `Err(AccessError::Forbidden(_))` - Actor is neither owner nor co-admin
    /// - `Err(AccessError::InvalidRole)` - Target is not a trainer
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_trainer_teams", skip_all, err)
    )]
    pub async fn execute(
        &self,
        membership_id: &str,
        team_ids: Vec<String>,
        actor_user_id: &str,
    ) -> Result<TournamentMembership, AccessError> {
        let target = self
            .membership_repo
            .find_by_id(membership_id)
            .await?
            .ok_or(AccessError::NotFound)?;

        let actor =
            actor_membership(&self.membership_repo, &target.tournament_id, actor_user_id).await?;

        if !can_manage_members(actor.role) {
            return Err(AccessError::Forbidden("only admins can assign teams"));
        }

        if target.role != TournamentRole::Trainer {
            return Err(AccessError::InvalidRole);
        }

        validate_team_ids(&team_ids)?;

        let updated = self
            .membership_repo
            .update_team_ids(&target.id, &team_ids)
            .await?;

        log::info!(
            target: "tourney_access",
            "msg=\"trainer teams updated\", tournament_id={}, membership_id={}, teams={}",
            target.tournament_id,
            target.id,
            team_ids.len()
        );

        dispatch(AccessEvent::TrainerTeamsUpdated {
            tournament_id: target.tournament_id,
            membership_id: target.id,
            actor_user_id: actor_user_id.to_owned(),
            team_ids,
            at: Utc::now(),
        })
        .await;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournaments::MockMembershipRepository;
    use crate::tournaments::actions::testing::{seed_member, teams};

    #[tokio::test]
    async fn test_co_admin_updates_trainer_teams() {
        let repo = MockMembershipRepository::new();
        seed_member(&repo, "t1", "admin", TournamentRole::CoAdmin, vec![]).await;
        let trainer =
            seed_member(&repo, "t1", "coach", TournamentRole::Trainer, teams(&["a"])).await;

        let updated = UpdateTrainerTeamsAction::new(repo)
            .execute(&trainer.id, teams(&["b", "c"]), "admin")
            .await
            .unwrap();

        assert_eq!(updated.team_ids, teams(&["b", "c"]));
        assert_eq!(updated.role, TournamentRole::Trainer);
    }

    #[tokio::test]
    async fn test_target_must_be_trainer() {
        let repo = MockMembershipRepository::new();
        seed_member(&repo, "t1", "owner", TournamentRole::Owner, vec![]).await;
        let viewer = seed_member(&repo, "t1", "v", TournamentRole::Viewer, vec![]).await;

        let result = UpdateTrainerTeamsAction::new(repo)
            .execute(&viewer.id, teams(&["a"]), "owner")
            .await;

        assert_eq!(result.unwrap_err(), AccessError::InvalidRole);
    }

    #[tokio::test]
    async fn test_trainer_cannot_reassign_own_teams() {
        let repo = MockMembershipRepository::new();
        let trainer =
            seed_member(&repo, "t1", "coach", TournamentRole::Trainer, teams(&["a"])).await;

        let result = UpdateTrainerTeamsAction::new(repo)
            .execute(&trainer.id, teams(&["a", "b"]), "coach")
            .await;

        assert!(matches!(result, Err(AccessError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_permission_checked_before_role() {
        let repo = MockMembershipRepository::new();
        seed_member(&repo, "t1", "collab", TournamentRole::Collaborator, vec![]).await;
        let viewer = seed_member(&repo, "t1", "v", TournamentRole::Viewer, vec![]).await;

        let result = UpdateTrainerTeamsAction::new(repo)
            .execute(&viewer.id, teams(&["a"]), "collab")
            .await;

        assert!(matches!(result, Err(AccessError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_actor_must_be_member() {
        let repo = MockMembershipRepository::new();
        let trainer =
            seed_member(&repo, "t1", "coach", TournamentRole::Trainer, teams(&["a"])).await;

        let result = UpdateTrainerTeamsAction::new(repo)
            .execute(&trainer.id, vec![], "nobody")
            .await;

        assert_eq!(result.unwrap_err(), AccessError::Unauthenticated);
    }
}
